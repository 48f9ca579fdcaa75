use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};

use crate::calendar::{clamp_year, in_month, year_grids};
use crate::services::{normalize_symbol, PriceLoader};
use crate::tui::theme::Theme;
use crate::types::{format_pct, PriceIndex, PriceRow};

/// Calendar heatmap of daily stock returns
#[derive(Parser)]
#[command(name = "stockheat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Ticker symbol to load
    #[arg(short, long, default_value = "AAPL")]
    symbol: String,

    /// Year to display (defaults to the current year, clamped to the
    /// rolling 5-year window)
    #[arg(short, long)]
    year: Option<i32>,

    /// Force the light color scheme
    #[arg(long, conflicts_with = "dark")]
    light: bool,

    /// Force the dark color scheme
    #[arg(long)]
    dark: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive heatmap (default)
    Tui,

    /// Print a per-month summary of the year
    Report {
        /// Output classified days as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let current_year = Local::now().year();
        let year = clamp_year(self.year.unwrap_or(current_year), current_year);
        let symbol = normalize_symbol(&self.symbol).unwrap_or_default();

        // Theme detection reads the terminal and must happen before raw mode
        let theme = if self.light {
            Theme::Light
        } else if self.dark {
            Theme::Dark
        } else {
            Theme::detect()
        };

        match self.command {
            None | Some(Commands::Tui) => crate::tui::app::run(symbol, year, theme),
            Some(Commands::Report { json }) => {
                let index = PriceLoader::new().load(&symbol, year);
                if json {
                    println!("{}", report_json(&index, year)?);
                } else {
                    print!("{}", report_text(&index, &symbol, year));
                }
                Ok(())
            }
        }
    }
}

/// Trading days of one month, in date order
fn month_rows(index: &PriceIndex, year: i32, month0: u32) -> Vec<&PriceRow> {
    let grid = crate::calendar::build_month_grid(year, month0);
    grid.weeks
        .iter()
        .flatten()
        .filter(|d| in_month(**d, year, month0))
        .filter_map(|d| index.get(*d))
        .collect()
}

/// Plain-text per-month summary
fn report_text(index: &PriceIndex, symbol: &str, year: i32) -> String {
    let mut out = format!("{} {}\n", symbol, year);
    let grids = year_grids(year);

    for (month0, grid) in grids.iter().enumerate() {
        let rows = month_rows(index, year, month0 as u32);
        if rows.is_empty() {
            out.push_str(&format!("{}   no data\n", grid.name));
            continue;
        }
        // Month change runs first open to last close
        let first = rows[0];
        let last = rows[rows.len() - 1];
        let month_pct = if first.open > 0.0 {
            Some((last.close - first.open) / first.open * 100.0)
        } else {
            None
        };
        out.push_str(&format!(
            "{}   {:>3} trading days   month {}\n",
            grid.name,
            rows.len(),
            format_pct(month_pct),
        ));
    }
    out
}

/// JSON array of classified days, date order
fn report_json(index: &PriceIndex, year: i32) -> anyhow::Result<String> {
    let mut days = Vec::new();
    for month0 in 0..12u32 {
        for row in month_rows(index, year, month0) {
            let pct = row.pct_change();
            days.push(serde_json::json!({
                "date": row.date,
                "open": row.open,
                "close": row.close,
                "pct": pct,
                "bucket": crate::types::ChangeBucket::from_pct(pct).label(),
            }));
        }
    }
    Ok(serde_json::to_string_pretty(&days)?)
}
