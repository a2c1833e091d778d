//! Spending charts for an expense tracker.
//!
//! This library turns pre-computed spending summaries (totals per category,
//! per day, per category per day, and a sparse calendar of daily totals) into
//! interactive ECharts visualizations served as a single HTML page.
//!
//! The work is split in two:
//! - [adapter] validates each aggregate record and reshapes it into exactly
//!   what a chart needs, or skips the chart when there is nothing to draw.
//! - The rendering side turns the prepared data into ECharts options and
//!   wraps them in a page with a chart switcher.

#![warn(missing_docs)]

pub mod adapter;
pub mod aggregate;
pub mod config;
mod dashboard;
mod html;

pub use aggregate::SpendingSummary;
pub use config::{Animation, ChartConfig, CurrencyFormat, Easing, HexColor, Palette};
pub use dashboard::{ChartKind, render_dashboard};

/// The errors that may occur while configuring or producing the dashboard.
///
/// Preparing chart data never fails; missing or malformed aggregate data
/// results in the chart being skipped instead.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A palette must contain at least one colour, otherwise series colours
    /// cannot be assigned.
    #[error("the colour palette must contain at least one colour")]
    EmptyPalette,

    /// A colour string was not in the `#RRGGBB` format.
    #[error("invalid colour \"{0}\", expected a hex colour such as #36A2EB")]
    InvalidColor(String),

    /// The currency symbol could not be used as a number prefix.
    ///
    /// The string holds the offending symbol.
    #[error("invalid currency symbol \"{0}\"")]
    InvalidCurrencySymbol(String),

    /// The spending summary file could not be read.
    #[error("could not read the spending summary: {0}")]
    ReadInput(String),

    /// The spending summary was not valid JSON or did not have the expected shape.
    #[error("could not parse the spending summary: {0}")]
    InvalidJson(String),

    /// The rendered dashboard could not be written.
    #[error("could not write the dashboard: {0}")]
    WriteOutput(String),

    /// The name did not match any dashboard chart.
    #[error("unknown chart \"{0}\", expected one of pie, line, stacked-line or calendar")]
    UnknownChart(String),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::InvalidJson(value.to_string())
    }
}
