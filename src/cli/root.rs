use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use super::schema::SchemaCommand;
use super::show::ShowCommand;
use crate::config::{Config, DisplayStyle};
use crate::tui;

/// Cardpager - browse a paginated card catalog in your terminal
#[derive(Parser)]
#[command(
    name = "cardpager",
    version,
    about = "Browse a paginated card catalog in your terminal",
    long_about = r#"Cardpager shows a catalog of sample items one page at a time.
Every page change goes through a short simulated loading phase.

Examples:
  cardpager                          # Start the interactive browser
  cardpager --page-size 12           # Twelve cards per page
  cardpager show 3 --format json     # Print page 3 as JSON
  cardpager schema --pretty          # Print the configuration schema"#
)]
pub struct Cli {
    /// Configuration file to use instead of the default locations
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Number of sample items in the catalog
    #[arg(short = 'n', long = "items", global = true)]
    pub items: Option<usize>,

    /// Items per page
    #[arg(long = "page-size", global = true)]
    pub page_size: Option<usize>,

    /// Simulated loading latency, e.g. "500ms" or "1s"
    #[arg(long = "delay", global = true, value_parser = humantime::parse_duration)]
    pub delay: Option<Duration>,

    /// Seed for reproducible sample data
    #[arg(long = "seed", global = true)]
    pub seed: Option<u64>,

    /// Layout of the pagination controls
    #[arg(long = "style", global = true, value_enum)]
    pub style: Option<DisplayStyle>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page non-interactively
    Show(ShowCommand),

    /// Generate or validate the configuration schema
    Schema(SchemaCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        let mut config = Config::init(self.config.as_deref()).await?;
        self.apply_overrides(&mut config);
        debug!("Configuration initialized");

        match self.command {
            Some(Commands::Schema(schema_cmd)) => schema_cmd.execute().await,
            Some(Commands::Show(show_cmd)) => {
                config.validate()?;
                show_cmd.execute(&config).await
            }
            None => {
                config.validate()?;
                info!("Starting interactive mode");
                tui::run(&config).await?;
                info!("Application finished");
                Ok(())
            }
        }
    }

    /// Command-line flags take precedence over file and environment settings
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(items) = self.items {
            config.item_count = items;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(delay) = self.delay {
            config.transition_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(style) = self.style {
            config.display_style = style;
        }
    }
}
