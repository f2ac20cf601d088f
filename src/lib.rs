pub mod client;
pub mod coin;
pub mod config;
pub mod dashboard;
pub mod history;
pub mod log;
pub mod theme;
pub mod ui;

use anyhow::Result;
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::coin::Coin;
use crate::dashboard::Dashboard;
use crate::theme::{ThemeHolder, ThemePreference};

/// Options resolved from CLI flags; `None` falls back to configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShowOptions {
    pub coin: Option<Coin>,
    pub days: Option<u32>,
    pub theme: Option<ThemePreference>,
    pub toggle_theme: bool,
}

pub async fn run(config_path: Option<&str>, options: ShowOptions) -> Result<()> {
    info!("Crypto dashboard starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let coin = options.coin.unwrap_or(config.default_coin);
    let days = options.days.unwrap_or(config.history_days);

    let mut theme = ThemeHolder::new(options.theme.unwrap_or(config.theme));
    if options.toggle_theme {
        theme.toggle();
    }

    let client = ApiClient::new(&config.api.base_url)?;
    let mut dashboard = Dashboard::new(&client, days);

    let pb = ui::new_progress_bar(3, true);
    pb.set_message(format!("Fetching {} analytics...", coin.full_name()));
    dashboard.select_coin(coin, pb.clone()).await;
    pb.finish_and_clear();

    println!(
        "{}",
        ui::render_dashboard(dashboard.phase(), coin, theme.current())
    );
    Ok(())
}
