//! Schema command: JSON schema generation and configuration file validation

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use schemars::schema_for;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::config::Config;

const DEFAULT_TITLE: &str = "Cardpager Configuration";
const DEFAULT_DESCRIPTION: &str = "Configuration schema for the cardpager catalog browser";

/// Generate and validate configuration schemas
#[derive(Debug, Args)]
pub struct SchemaCommand {
    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty print the output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommands for schema operations
    #[command(subcommand)]
    pub command: Option<SchemaSubcommand>,
}

#[derive(Debug, Subcommand)]
pub enum SchemaSubcommand {
    /// Generate JSON schema for configuration
    Generate {
        /// Schema title
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,

        /// Schema description
        #[arg(long, default_value = DEFAULT_DESCRIPTION)]
        description: String,
    },
    /// Validate a configuration file
    Validate {
        /// Configuration file to validate
        config_file: PathBuf,
    },
    /// Show configuration documentation
    Docs,
}

impl SchemaCommand {
    /// Execute the schema command
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Some(SchemaSubcommand::Generate { title, description }) => self.generate_schema(title, description).await,
            Some(SchemaSubcommand::Validate { config_file }) => {
                let config = validate_config_file(config_file).await?;
                println!("Configuration is valid: {}", config_file.display());
                println!(
                    "  {} items, {} per page, {}ms transition",
                    config.item_count, config.page_size, config.transition_delay_ms
                );
                Ok(())
            }
            Some(SchemaSubcommand::Docs) => {
                print!("{}", docs());
                Ok(())
            }
            None => self.generate_schema(DEFAULT_TITLE, DEFAULT_DESCRIPTION).await,
        }
    }

    async fn generate_schema(&self, title: &str, description: &str) -> Result<()> {
        let schema_value = schema_value(title, description)?;
        let output = if self.pretty {
            serde_json::to_string_pretty(&schema_value)?
        } else {
            serde_json::to_string(&schema_value)?
        };

        if let Some(ref output_path) = self.output {
            tokio::fs::write(output_path, output)
                .await
                .with_context(|| format!("Failed to write schema to: {}", output_path.display()))?;
            println!("Schema written to: {}", output_path.display());
        } else {
            println!("{}", output);
        }

        Ok(())
    }
}

/// JSON schema of [`Config`] with title and description metadata
pub fn schema_value(title: &str, description: &str) -> Result<Value> {
    let schema = schema_for!(Config);
    let mut schema_value = serde_json::to_value(schema).context("Failed to convert schema to JSON value")?;

    if let Some(obj) = schema_value.as_object_mut() {
        obj.insert("title".to_string(), Value::String(title.to_string()));
        obj.insert("description".to_string(), Value::String(description.to_string()));
    }

    Ok(schema_value)
}

/// Load a configuration file and run the semantic checks on it
pub async fn validate_config_file(path: &Path) -> Result<Config> {
    let config = Config::load_file(path).await?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}

fn docs() -> String {
    let mut out = String::from("Cardpager Configuration\n=======================\n\n");

    out.push_str("Configuration file locations (first found wins):\n");
    for path in Config::config_paths() {
        out.push_str(&format!("  {}\n", path.display()));
    }

    out.push_str("\nEnvironment variables (override the file):\n");
    out.push_str("  CARDPAGER_ITEMS       Number of sample items\n");
    out.push_str("  CARDPAGER_PAGE_SIZE   Items per page\n");
    out.push_str("  CARDPAGER_DELAY_MS    Simulated loading latency in milliseconds\n");
    out.push_str("  CARDPAGER_SEED        Seed for reproducible sample data\n");
    out.push_str("  CARDPAGER_STYLE       compact, full, numbers or google\n");
    out.push_str("  CARDPAGER_ANIMATIONS  false disables shimmer and fade effects\n");
    out.push_str("  RUST_LOG              Log filter, e.g. cardpager=debug\n");

    out.push_str("\nCommand-line flags override both.\n");
    out
}
