use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::{debug, info, warn};

use crate::catalog::{sample_catalog, Item};
use crate::config::Config;
use crate::pager::{NavigationStats, PageController, PageState, Phase, TransitionOutcome};
use crate::tui::truncate_to_width;

/// Print one page of the catalog without starting the terminal UI
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Page to show; out-of-range values are clamped to the nearest page
    #[arg(default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Change the page size after moving to the page
    #[arg(long = "resize")]
    pub resize: Option<usize>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Include navigation counters in the output
    #[arg(long = "stats")]
    pub stats: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Settled page as printed by `show`
#[derive(Debug, Serialize)]
pub struct PageReport {
    #[serde(flatten)]
    pub state: PageState,
    pub phase: Phase,
    pub items: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<NavigationStats>,
}

impl ShowCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        debug!("Executing show command");

        let report = self.report(config).await;
        let output = match self.format {
            OutputFormat::Table => render_table(&report),
            OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        };

        println!("{}", output);
        Ok(())
    }

    /// Drive a controller through the requested navigation and capture the result
    pub async fn report(&self, config: &Config) -> PageReport {
        let items = sample_catalog(config.item_count, config.seed);
        let mut controller = PageController::from_config(items, config);

        let outcome = controller.request_page(self.page).await;
        info!(requested = self.page, ?outcome, "Page request finished");
        if outcome == TransitionOutcome::Ignored {
            warn!("Catalog is empty, nothing to page through");
        }

        if let Some(size) = self.resize {
            let outcome = controller.request_page_size_change(size).await;
            info!(size, ?outcome, "Page size change finished");
        }

        let state = controller.snapshot();
        let report = PageReport {
            state,
            phase: state.phase(),
            items: controller.visible_slice().to_vec(),
            stats: self.stats.then(|| controller.stats().clone()),
        };

        controller.dispose();
        report
    }
}

/// Plain-text table of a page report
pub fn render_table(report: &PageReport) -> String {
    let state = &report.state;
    let mut out = String::new();

    if state.is_empty() {
        out.push_str("No items to display");
    } else {
        let range = state.item_range();
        let _ = writeln!(
            out,
            "Page {} of {} (items {}-{} of {}, {} per page)",
            state.current_page,
            state.total_pages,
            range.start + 1,
            range.end,
            state.total_items,
            state.page_size
        );
        let _ = writeln!(
            out,
            "{:<9} {:<16} {:<12} {:>9} {:<6} {}",
            "ID", "NAME", "CATEGORY", "PRICE", "RATING", "STOCK"
        );
        for item in &report.items {
            let _ = writeln!(
                out,
                "{:<9} {:<16} {:<12} {:>9} {:<6} {}",
                item.id,
                truncate_to_width(&item.name, 16),
                item.category,
                item.price(),
                item.rating_label(),
                item.stock_label()
            );
        }
    }

    if let Some(stats) = &report.stats {
        let patterns: Vec<String> = stats
            .patterns
            .iter()
            .map(|(pattern, count)| format!("{}={}", pattern, count))
            .collect();
        let _ = write!(
            out,
            "\nRequests: {} accepted, {} ignored ({})",
            stats.accepted,
            stats.ignored,
            patterns.join(", ")
        );
    }

    out.trim_end().to_string()
}
