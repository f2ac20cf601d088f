//! Theme preference shared between the dashboard and its renderers.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

/// Explicit holder for the process-wide theme preference.
///
/// Created once at application start; renderers read it through `current`
/// and only the owner mutates it through `set` or `toggle`. Persistence,
/// if any, belongs to whoever owns the configuration, not here.
#[derive(Debug)]
pub struct ThemeHolder {
    current: ThemePreference,
}

impl ThemeHolder {
    pub fn new(initial: ThemePreference) -> Self {
        ThemeHolder { current: initial }
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    pub fn set(&mut self, theme: ThemePreference) {
        self.current = theme;
    }

    pub fn toggle(&mut self) {
        self.current = self.current.toggled();
    }
}
