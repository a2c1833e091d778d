//! Aggregate spending records consumed by the chart adapter.
//!
//! These are pre-computed summaries (sums per category or per date) produced
//! upstream. Every field is optional so that a record with a missing field can
//! be deserialized and then skipped, rather than rejected outright.

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::Error;

/// Total spending per category, e.g. for a pie chart.
///
/// `values[i]` is the total for `labels[i]`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategorySpendingSet {
    /// Category names.
    pub labels: Option<Vec<String>>,
    /// Totals, index-aligned with `labels`.
    pub values: Option<Vec<f64>>,
}

/// Total spending per day.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailySpendingSeries {
    /// Dates, in display order.
    pub labels: Option<Vec<String>>,
    /// Totals, index-aligned with `labels`.
    pub values: Option<Vec<f64>>,
}

/// Spending per day broken down by category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategoryTimeSeries {
    /// Dates, in display order.
    pub labels: Option<Vec<String>>,
    /// Category names in display and colour order.
    pub categories: Option<Vec<String>>,
    /// Daily totals per category, each index-aligned with `labels`.
    pub values: Option<HashMap<String, Vec<f64>>>,
}

/// Sparse daily spending used for the calendar heatmap.
///
/// Dates in `labels` with no entry in `values` had no spending.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CalendarSpendingMap {
    /// Every date to show, in order. Also accepted as `dates`.
    #[serde(alias = "dates")]
    pub labels: Option<Vec<String>>,
    /// Spending keyed by date string.
    pub values: Option<HashMap<String, f64>>,
}

/// All the aggregate records needed to draw the spending dashboard.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpendingSummary {
    /// Totals per category.
    pub category_spending: Option<CategorySpendingSet>,
    /// Totals per day.
    pub daily_spending: Option<DailySpendingSeries>,
    /// Totals per day per category.
    pub category_daily_spending: Option<CategoryTimeSeries>,
    /// Sparse totals per day for the calendar.
    pub calendar_spending: Option<CalendarSpendingMap>,
}

impl SpendingSummary {
    /// Parse a summary from a JSON string.
    ///
    /// # Errors
    /// Returns [Error::InvalidJson] if the text is not valid JSON or a field
    /// has the wrong type.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a summary from a JSON file.
    ///
    /// # Errors
    /// Returns [Error::ReadInput] if the file cannot be read, or
    /// [Error::InvalidJson] if its contents cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .map_err(|error| Error::ReadInput(format!("{}: {error}", path.display())))?;

        Self::from_json(&text)
    }

    /// The sum of all category totals, if any are present.
    pub fn total_spending(&self) -> Option<f64> {
        self.category_spending
            .as_ref()
            .and_then(|set| set.values.as_ref())
            .filter(|values| !values.is_empty())
            .map(|values| values.iter().sum())
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::SpendingSummary;

    #[test]
    fn parses_full_summary() {
        let json = r#"{
            "category_spending": {"labels": ["Food", "Rent"], "values": [50, 1000]},
            "daily_spending": {"labels": ["2024-01-01"], "values": [12.5]},
            "category_daily_spending": {
                "labels": ["2024-01-01"],
                "categories": ["Food"],
                "values": {"Food": [12.5]}
            },
            "calendar_spending": {"labels": ["2024-01-01"], "values": {"2024-01-01": 12.5}}
        }"#;

        let summary = SpendingSummary::from_json(json).unwrap();

        let categories = summary.category_spending.unwrap();
        assert_eq!(
            categories.labels,
            Some(vec!["Food".to_owned(), "Rent".to_owned()])
        );
        assert_eq!(categories.values, Some(vec![50.0, 1000.0]));
        let time_series = summary.category_daily_spending.unwrap();
        assert_eq!(time_series.values.unwrap()["Food"], vec![12.5]);
        let calendar = summary.calendar_spending.unwrap();
        assert_eq!(calendar.values.unwrap()["2024-01-01"], 12.5);
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let summary =
            SpendingSummary::from_json(r#"{"category_spending": {"labels": []}}"#).unwrap();

        let categories = summary.category_spending.unwrap();
        assert_eq!(categories.labels, Some(vec![]));
        assert_eq!(categories.values, None);
        assert_eq!(summary.daily_spending, None);
        assert_eq!(summary.calendar_spending, None);
    }

    #[test]
    fn calendar_accepts_dates_field() {
        let summary = SpendingSummary::from_json(
            r#"{"calendar_spending": {"dates": ["2024-01-01"], "values": {}}}"#,
        )
        .unwrap();

        assert_eq!(
            summary.calendar_spending.unwrap().labels,
            Some(vec!["2024-01-01".to_owned()])
        );
    }

    #[test]
    fn rejects_malformed_json() {
        let result = SpendingSummary::from_json(r#"{"category_spending": {"labels": 3}}"#);

        assert!(matches!(result, Err(Error::InvalidJson(_))));
    }

    #[test]
    fn total_spending_sums_category_totals() {
        let summary = SpendingSummary::from_json(
            r#"{"category_spending": {"labels": ["Food", "Rent"], "values": [50, 1000]}}"#,
        )
        .unwrap();

        assert_eq!(summary.total_spending(), Some(1050.0));
        assert_eq!(SpendingSummary::default().total_spending(), None);
    }
}
