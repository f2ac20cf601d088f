use anyhow::Result;
use clap::{Parser, Subcommand};
use cryptodash::ShowOptions;
use cryptodash::coin::Coin;
use cryptodash::log::init_logging;
use cryptodash::theme::ThemePreference;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the analytics dashboard
    Show {
        /// Coin to display
        #[arg(long, value_enum)]
        coin: Option<Coin>,

        /// History window in days
        #[arg(long)]
        days: Option<u32>,

        /// Color theme
        #[arg(long, value_enum)]
        theme: Option<ThemePreference>,

        /// Render with the opposite of the configured theme
        #[arg(long)]
        toggle_theme: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = match cli.command {
        Some(Commands::Setup) => return report(setup()),
        Some(Commands::Show {
            coin,
            days,
            theme,
            toggle_theme,
        }) => ShowOptions {
            coin,
            days,
            theme,
            toggle_theme,
        },
        None => ShowOptions::default(),
    };

    report(cryptodash::run(cli.config_path.as_deref(), options).await)
}

fn report(result: Result<()>) -> Result<()> {
    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> Result<()> {
    use anyhow::Context;

    let path = cryptodash::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
api:
  base_url: "http://localhost:3000"

# bitcoin | ethereum | matic-network
default_coin: bitcoin
history_days: 30
# light | dark
theme: light
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
