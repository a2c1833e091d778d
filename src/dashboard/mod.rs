//! Dashboard module
//!
//! Provides a single page showing spending charts, with tabs to switch
//! between them.

mod charts;
mod page;

use std::{fmt, str::FromStr};

use crate::Error;

pub use page::render_dashboard;

/// The charts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Spending per category.
    Pie,
    /// Daily spending over time.
    Line,
    /// Daily spending over time, stacked by category.
    StackedLine,
    /// Daily spending shaded by intensity.
    Calendar,
}

impl ChartKind {
    /// Every chart, in the order the tabs are shown.
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Pie,
        ChartKind::Line,
        ChartKind::StackedLine,
        ChartKind::Calendar,
    ];

    /// The name passed to `switchChart`.
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
            ChartKind::StackedLine => "stackedLine",
            ChartKind::Calendar => "calendar",
        }
    }

    /// The ID of the element wrapping the chart, shown and hidden by `switchChart`.
    pub fn container_id(&self) -> String {
        format!("{}Container", self.name())
    }

    /// The ID of the element the chart is drawn into.
    pub fn chart_id(&self) -> &'static str {
        match self {
            ChartKind::Pie => "pieChart",
            ChartKind::Line => "lineChart",
            ChartKind::StackedLine => "stackedLineChart",
            ChartKind::Calendar => "calendarHeatmap",
        }
    }

    /// The text on the chart's tab.
    pub fn tab_label(&self) -> &'static str {
        match self {
            ChartKind::Pie => "Categories",
            ChartKind::Line => "Trend",
            ChartKind::StackedLine => "By Category",
            ChartKind::Calendar => "Calendar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = Error;

    /// Accepts the `switchChart` name or its kebab-case form, e.g.
    /// "stackedLine" or "stacked-line".
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "pie" => Ok(ChartKind::Pie),
            "line" => Ok(ChartKind::Line),
            "stackedLine" | "stacked-line" => Ok(ChartKind::StackedLine),
            "calendar" => Ok(ChartKind::Calendar),
            other => Err(Error::UnknownChart(other.to_owned())),
        }
    }
}
