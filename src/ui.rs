use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::{DeviationStats, PriceStats};
use crate::coin::Coin;
use crate::dashboard::Phase;
use crate::history::PricePoint;
use crate::theme::ThemePreference;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Error => style(text).red().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

fn header_color(theme: ThemePreference) -> Color {
    match theme {
        ThemePreference::Light => Color::Blue,
        ThemePreference::Dark => Color::Cyan,
    }
}

fn accent(text: &str, theme: ThemePreference) -> String {
    let styled = match theme {
        ThemePreference::Light => style(text).blue().bold(),
        ThemePreference::Dark => style(text).cyan().bold(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a card, colored per the active theme.
pub fn header_cell(text: &str, theme: ThemePreference) -> Cell {
    Cell::new(text)
        .fg(header_color(theme))
        .add_attribute(Attribute::Bold)
}

fn value_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Formats a value as US dollars with thousands separators and 2 decimals.
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// Formats a 24h percentage change with a directional indicator.
pub fn format_change(change: f64) -> String {
    let arrow = if change >= 0.0 { "▲" } else { "▼" };
    format!("{arrow} {change:.2}%")
}

/// Creates a cell for displaying percentage change with color keyed to sign.
pub fn change_cell(change: f64) -> Cell {
    let cell = Cell::new(format_change(change)).set_alignment(CellAlignment::Right);
    if change >= 0.0 {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::Red)
    }
}

/// Renders the fixed coin set with the current selection highlighted.
pub fn coin_selector(selected: Coin, theme: ThemePreference) -> String {
    let entries: Vec<String> = Coin::ALL
        .iter()
        .map(|&coin| {
            let label = format!("{} ({})", coin.full_name(), coin.ticker());
            if coin == selected {
                format!("● {}", accent(&label, theme))
            } else {
                format!("○ {}", style_text(&label, StyleType::Subtle))
            }
        })
        .collect();
    entries.join("   ")
}

pub fn price_stats_card(stats: &PriceStats, theme: ThemePreference) -> String {
    let mut table = new_styled_table();
    table.set_header(vec![header_cell("Price Statistics", theme), Cell::new("")]);
    table.add_row(vec![
        Cell::new("Current Price"),
        value_cell(format_currency(stats.price)),
    ]);
    table.add_row(vec![Cell::new("24h Change"), change_cell(stats.change_24h)]);
    table.add_row(vec![
        Cell::new("Market Cap"),
        value_cell(format_currency(stats.market_cap)),
    ]);
    table.to_string()
}

pub fn deviation_card(deviation: &DeviationStats, theme: ThemePreference) -> String {
    let mut table = new_styled_table();
    table.set_header(vec![header_cell("Price Deviation", theme), Cell::new("")]);
    table.add_row(vec![
        Cell::new("Standard Deviation"),
        value_cell(format_currency(deviation.deviation)),
    ]);
    table.add_row(vec![
        Cell::new("Mean Price"),
        value_cell(format!("${:.2}", deviation.mean)),
    ]);
    table.add_row(vec![
        Cell::new("Variance"),
        value_cell(format!("${:.2}", deviation.variance)),
    ]);
    table.to_string()
}

pub fn history_card(points: &[PricePoint], days: u32, theme: ThemePreference) -> String {
    let title = format!("Price History ({days} Days)");
    format!(
        "{}\n{}",
        accent(&title, theme),
        render_line_chart(points, 60, 12)
    )
}

/// Plots prices into a character grid: y-axis labeled with max/mid/min in
/// currency, x-axis labeled with the first and last dates. Points keep their
/// input order left to right; when there are more points than columns, the
/// series is sampled with exact endpoints.
pub fn render_line_chart(points: &[PricePoint], width: usize, height: usize) -> String {
    if points.is_empty() || width == 0 || height == 0 {
        return style_text("(no data)", StyleType::Subtle);
    }

    let cols = width.min(points.len());
    let sampled: Vec<&PricePoint> = (0..cols)
        .map(|col| {
            let index = if cols == 1 {
                0
            } else {
                col * (points.len() - 1) / (cols - 1)
            };
            &points[index]
        })
        .collect();

    let min = sampled.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max = sampled
        .iter()
        .map(|p| p.price)
        .fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let mut grid = vec![vec![' '; cols]; height];
    for (col, point) in sampled.iter().enumerate() {
        let level = if span == 0.0 {
            (height - 1) / 2
        } else {
            ((point.price - min) / span * (height - 1) as f64).round() as usize
        };
        grid[height - 1 - level][col] = '●';
    }

    let labels = [
        format_currency(max),
        format_currency((max + min) / 2.0),
        format_currency(min),
    ];
    let gutter = labels.iter().map(|l| l.len()).max().unwrap_or(0);

    let mut output = String::new();
    for (row, cells) in grid.iter().enumerate() {
        let label = if row == 0 {
            labels[0].as_str()
        } else if row == height - 1 {
            labels[2].as_str()
        } else if row == height / 2 {
            labels[1].as_str()
        } else {
            ""
        };
        let line: String = cells.iter().collect();
        output.push_str(&format!("{label:>gutter$} ┤{line}\n"));
    }
    output.push_str(&format!("{:>gutter$} └{}\n", "", "─".repeat(cols)));

    let first = sampled.first().map_or("", |p| p.date.as_str());
    let last = sampled.last().map_or("", |p| p.date.as_str());
    let dates = if cols > first.len() + last.len() {
        format!("{first}{}{last}", " ".repeat(cols - first.len() - last.len()))
    } else {
        format!("{first} .. {last}")
    };
    output.push_str(&format!("{:>gutter$}  {dates}", ""));
    output
}

/// Error banner shown instead of the content area.
pub fn error_banner(message: &str) -> String {
    style_text(message, StyleType::Error)
}

/// Renders the whole dashboard for the committed phase.
pub fn render_dashboard(phase: &Phase, selected: Coin, theme: ThemePreference) -> String {
    let mut output = format!("{}\n\n", style_text("Crypto Analytics", StyleType::Title));
    output.push_str(&coin_selector(selected, theme));
    output.push_str("\n\n");

    match phase {
        Phase::Idle => output.push_str(&style_text("No coin selected", StyleType::Subtle)),
        Phase::Loading => output.push_str(&style_text("Loading...", StyleType::Subtle)),
        Phase::Error(message) => output.push_str(&error_banner(message)),
        Phase::Ready(snapshot) => {
            output.push_str(&price_stats_card(&snapshot.stats, theme));
            output.push('\n');
            output.push_str(&deviation_card(&snapshot.deviation, theme));
            output.push('\n');
            output.push_str(&history_card(&snapshot.history, snapshot.days, theme));
        }
    }
    output
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, with_message: bool) -> ProgressBar {
    let template = if with_message {
        "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    } else {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    };

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}
