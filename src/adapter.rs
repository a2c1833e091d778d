//! Validation and reshaping of aggregate spending records for charts.
//!
//! Each `prepare_*` function checks that a record has the data its chart needs
//! and returns exactly what the renderer consumes. Missing or malformed data
//! never raises an error: the chart is skipped and the reason is logged.
//!
//! All functions are pure. Calling one twice with the same input gives the
//! same output.

use std::fmt;

use crate::{
    aggregate::{CalendarSpendingMap, CategorySpendingSet, CategoryTimeSeries, DailySpendingSeries},
    config::ChartConfig,
};

/// The outcome of preparing data for one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared<T> {
    /// The data is valid and ready to be drawn.
    Render(T),
    /// There is nothing to draw, the chart should not be created.
    Skip(SkipReason),
}

impl<T> Prepared<T> {
    /// The prepared data, or `None` if the chart was skipped.
    pub fn into_option(self) -> Option<T> {
        match self {
            Prepared::Render(data) => Some(data),
            Prepared::Skip(_) => None,
        }
    }

    /// Whether the chart was skipped.
    pub fn is_skip(&self) -> bool {
        matches!(self, Prepared::Skip(_))
    }
}

/// Why a chart was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    /// No record was supplied.
    #[error("no data was supplied")]
    MissingRecord,
    /// A required field was absent from the record.
    #[error("the field \"{0}\" is missing")]
    MissingField(&'static str),
    /// A required collection had no entries.
    #[error("the field \"{0}\" is empty")]
    EmptyField(&'static str),
    /// `labels` and `values` had different lengths.
    #[error("found {labels} labels but {values} values")]
    LengthMismatch {
        /// The number of labels.
        labels: usize,
        /// The number of values.
        values: usize,
    },
}

/// The chart a record was prepared for, used in diagnostics.
#[derive(Debug, Clone, Copy)]
enum Target {
    CategoryBreakdown,
    DailyTrend,
    CategoryTimeSeries,
    CalendarHeatmap,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::CategoryBreakdown => "category breakdown",
            Target::DailyTrend => "daily trend",
            Target::CategoryTimeSeries => "category time series",
            Target::CalendarHeatmap => "calendar heatmap",
        };

        f.write_str(name)
    }
}

fn skip<T>(target: Target, reason: SkipReason) -> Prepared<T> {
    tracing::info!("No data available for the {target} chart: {reason}");
    Prepared::Skip(reason)
}

/// Spending per category with one colour per slice.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    /// Category names.
    pub labels: Vec<String>,
    /// Totals, index-aligned with `labels`.
    pub values: Vec<f64>,
    /// Slice colours, index-aligned with `labels`.
    pub colors: Vec<String>,
}

/// Daily spending drawn as a single series.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTrend {
    /// Dates, in order.
    pub labels: Vec<String>,
    /// Totals, index-aligned with `labels`.
    pub values: Vec<f64>,
    /// The series colour.
    pub color: String,
}

/// One category's daily totals in a multi-series chart.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    /// The category name.
    pub name: String,
    /// Daily totals, one per label.
    pub data: Vec<f64>,
    /// The series colour.
    pub color: String,
}

/// Daily spending split into one series per category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTimeSeriesInput {
    /// Dates, in order.
    pub labels: Vec<String>,
    /// One series per category, in category order.
    pub series: Vec<NamedSeries>,
}

/// One day in the calendar heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapPoint {
    /// The date.
    pub x: String,
    /// The amount spent, zero for days with no entry.
    pub y: f64,
    /// `y` relative to the largest amount, in `[0, 1]`.
    pub intensity: f64,
}

/// A gap-free run of days with the relative intensity of each.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarHeatmap {
    /// One point per date, in date order.
    pub points: Vec<HeatmapPoint>,
    /// The largest amount in the record, or zero.
    pub max_value: f64,
}

/// Prepare per-category totals for a pie chart.
///
/// The colour for `labels[i]` is `palette[i % palette.len()]`.
///
/// Skips when `data` is absent, `labels` or `values` is missing, `labels` is
/// empty, or the two lengths differ.
pub fn prepare_category_breakdown(
    data: Option<&CategorySpendingSet>,
    config: &ChartConfig,
) -> Prepared<CategoryBreakdown> {
    let target = Target::CategoryBreakdown;

    let (labels, values) = match validate_flat_series(
        data.map(|data| (data.labels.as_ref(), data.values.as_ref())),
    ) {
        Ok(pair) => pair,
        Err(reason) => return skip(target, reason),
    };

    let colors = (0..labels.len())
        .map(|index| config.palette.color_at(index).to_owned())
        .collect();

    tracing::debug!("Prepared {} categories for the {target} chart", labels.len());

    Prepared::Render(CategoryBreakdown {
        labels: labels.clone(),
        values: values.clone(),
        colors,
    })
}

/// Prepare daily totals for a single-series line chart.
///
/// Labels and values pass through unchanged, drawn in the primary colour.
/// Uses the same skip rules as [prepare_category_breakdown].
pub fn prepare_daily_trend(
    data: Option<&DailySpendingSeries>,
    config: &ChartConfig,
) -> Prepared<DailyTrend> {
    let target = Target::DailyTrend;

    let (labels, values) = match validate_flat_series(
        data.map(|data| (data.labels.as_ref(), data.values.as_ref())),
    ) {
        Ok(pair) => pair,
        Err(reason) => return skip(target, reason),
    };

    tracing::debug!("Prepared {} days for the {target} chart", labels.len());

    Prepared::Render(DailyTrend {
        labels: labels.clone(),
        values: values.clone(),
        color: config.primary_color.to_string(),
    })
}

fn validate_flat_series<'a>(
    fields: Option<(Option<&'a Vec<String>>, Option<&'a Vec<f64>>)>,
) -> Result<(&'a Vec<String>, &'a Vec<f64>), SkipReason> {
    let (labels, values) = fields.ok_or(SkipReason::MissingRecord)?;
    let labels = labels.ok_or(SkipReason::MissingField("labels"))?;
    let values = values.ok_or(SkipReason::MissingField("values"))?;

    if labels.is_empty() {
        return Err(SkipReason::EmptyField("labels"));
    }

    if labels.len() != values.len() {
        return Err(SkipReason::LengthMismatch {
            labels: labels.len(),
            values: values.len(),
        });
    }

    Ok((labels, values))
}

/// Prepare per-category daily totals for a stacked line chart.
///
/// Produces one series per entry in `categories`, in that order, coloured
/// cyclically from the palette. A category with no entry in `values` is drawn
/// as all zeros, and every series is zero-padded or truncated to the number of
/// labels.
///
/// Skips when `data` is absent, `labels` is missing, or `categories` is
/// missing or empty.
pub fn prepare_category_time_series(
    data: Option<&CategoryTimeSeries>,
    config: &ChartConfig,
) -> Prepared<CategoryTimeSeriesInput> {
    let target = Target::CategoryTimeSeries;

    let Some(data) = data else {
        return skip(target, SkipReason::MissingRecord);
    };
    let Some(labels) = &data.labels else {
        return skip(target, SkipReason::MissingField("labels"));
    };
    let Some(categories) = &data.categories else {
        return skip(target, SkipReason::MissingField("categories"));
    };
    if categories.is_empty() {
        return skip(target, SkipReason::EmptyField("categories"));
    }

    let series = categories
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let mut values = data
                .values
                .as_ref()
                .and_then(|values| values.get(category))
                .cloned()
                .unwrap_or_else(|| {
                    tracing::debug!("No values for the category \"{category}\", using zeros");
                    Vec::new()
                });
            values.resize(labels.len(), 0.0);

            NamedSeries {
                name: category.clone(),
                data: values,
                color: config.palette.color_at(index).to_owned(),
            }
        })
        .collect();

    tracing::debug!(
        "Prepared {} categories over {} days for the {target} chart",
        categories.len(),
        labels.len()
    );

    Prepared::Render(CategoryTimeSeriesInput {
        labels: labels.clone(),
        series,
    })
}

/// Prepare sparse daily totals for the calendar heatmap.
///
/// Emits one point per date in `labels`, using zero for dates with no entry in
/// `values`, so the time axis has no gaps. Each point's intensity is its amount
/// divided by the largest amount in `values`, clamped to `[0, 1]`, and zero
/// when the largest amount is zero.
///
/// Skips when `data` is absent, `labels` is missing or empty, or `values` is
/// missing or has no entries.
pub fn prepare_calendar_heatmap(data: Option<&CalendarSpendingMap>) -> Prepared<CalendarHeatmap> {
    let target = Target::CalendarHeatmap;

    let Some(data) = data else {
        return skip(target, SkipReason::MissingRecord);
    };
    let Some(labels) = &data.labels else {
        return skip(target, SkipReason::MissingField("labels"));
    };
    if labels.is_empty() {
        return skip(target, SkipReason::EmptyField("labels"));
    }
    let Some(values) = &data.values else {
        return skip(target, SkipReason::MissingField("values"));
    };
    if values.is_empty() {
        return skip(target, SkipReason::EmptyField("values"));
    }

    let max_value = values.values().copied().fold(0.0, f64::max);

    let points = labels
        .iter()
        .map(|date| {
            let y = values.get(date).copied().unwrap_or(0.0);

            HeatmapPoint {
                x: date.clone(),
                y,
                intensity: intensity(y, max_value),
            }
        })
        .collect();

    tracing::debug!(
        "Prepared {} days for the {target} chart, largest amount {max_value}",
        labels.len()
    );

    Prepared::Render(CalendarHeatmap { points, max_value })
}

fn intensity(value: f64, max_value: f64) -> f64 {
    if max_value > 0.0 {
        (value / max_value).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{
        aggregate::{
            CalendarSpendingMap, CategorySpendingSet, CategoryTimeSeries, DailySpendingSeries,
        },
        config::{ChartConfig, HexColor, Palette},
    };

    use super::{
        CategoryBreakdown, NamedSeries, Prepared, SkipReason, prepare_calendar_heatmap,
        prepare_category_breakdown, prepare_category_time_series, prepare_daily_trend,
    };

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|&item| item.to_owned()).collect()
    }

    fn category_set(labels: &[&str], values: &[f64]) -> CategorySpendingSet {
        CategorySpendingSet {
            labels: Some(strings(labels)),
            values: Some(values.to_vec()),
        }
    }

    fn calendar(labels: &[&str], values: &[(&str, f64)]) -> CalendarSpendingMap {
        CalendarSpendingMap {
            labels: Some(strings(labels)),
            values: Some(
                values
                    .iter()
                    .map(|&(date, amount)| (date.to_owned(), amount))
                    .collect(),
            ),
        }
    }

    #[test]
    fn category_breakdown_assigns_palette_colours() {
        let data = category_set(&["Food", "Rent"], &[50.0, 1000.0]);

        let result = prepare_category_breakdown(Some(&data), &ChartConfig::default());

        assert_eq!(
            result,
            Prepared::Render(CategoryBreakdown {
                labels: strings(&["Food", "Rent"]),
                values: vec![50.0, 1000.0],
                colors: strings(&["#FF6384", "#36A2EB"]),
            })
        );
    }

    #[test]
    fn category_breakdown_cycles_colours_past_palette_size() {
        let labels: Vec<String> = (0..8).map(|i| format!("Category {i}")).collect();
        let data = CategorySpendingSet {
            labels: Some(labels.clone()),
            values: Some(vec![1.0; 8]),
        };
        let config = ChartConfig::default();

        let result = prepare_category_breakdown(Some(&data), &config)
            .into_option()
            .unwrap();

        assert_eq!(result.labels, labels);
        for (index, color) in result.colors.iter().enumerate() {
            assert_eq!(color, config.palette.color_at(index % 6));
        }
        assert_eq!(result.colors[6], "#FF6384");
        assert_eq!(result.colors[7], "#36A2EB");
    }

    #[test]
    fn category_breakdown_skips_missing_or_empty_data() {
        let config = ChartConfig::default();
        let cases = [
            (None, SkipReason::MissingRecord),
            (
                Some(CategorySpendingSet {
                    labels: None,
                    values: Some(vec![1.0]),
                }),
                SkipReason::MissingField("labels"),
            ),
            (
                Some(CategorySpendingSet {
                    labels: Some(strings(&["Food"])),
                    values: None,
                }),
                SkipReason::MissingField("values"),
            ),
            (Some(category_set(&[], &[])), SkipReason::EmptyField("labels")),
            (
                Some(category_set(&["Food", "Rent"], &[1.0])),
                SkipReason::LengthMismatch {
                    labels: 2,
                    values: 1,
                },
            ),
        ];

        for (data, want) in cases {
            let result = prepare_category_breakdown(data.as_ref(), &config);
            assert_eq!(result, Prepared::Skip(want), "input {data:?}");
        }
    }

    #[test]
    fn daily_trend_passes_through_in_order_with_primary_colour() {
        let data = DailySpendingSeries {
            labels: Some(strings(&["2024-01-03", "2024-01-01"])),
            values: Some(vec![3.0, 1.0]),
        };
        let config = ChartConfig {
            primary_color: HexColor::parse("#112233").unwrap(),
            ..Default::default()
        };

        let result = prepare_daily_trend(Some(&data), &config)
            .into_option()
            .unwrap();

        assert_eq!(result.labels, strings(&["2024-01-03", "2024-01-01"]));
        assert_eq!(result.values, vec![3.0, 1.0]);
        assert_eq!(result.color, "#112233");
    }

    #[test]
    fn daily_trend_skips_missing_or_empty_data() {
        let config = ChartConfig::default();

        assert!(prepare_daily_trend(None, &config).is_skip());
        assert_eq!(
            prepare_daily_trend(Some(&DailySpendingSeries::default()), &config),
            Prepared::Skip(SkipReason::MissingField("labels"))
        );
        let empty = DailySpendingSeries {
            labels: Some(vec![]),
            values: Some(vec![]),
        };
        assert_eq!(
            prepare_daily_trend(Some(&empty), &config),
            Prepared::Skip(SkipReason::EmptyField("labels"))
        );
    }

    #[test]
    fn category_time_series_builds_one_series_per_category_in_order() {
        let data = CategoryTimeSeries {
            labels: Some(strings(&["2024-01-01", "2024-01-02"])),
            categories: Some(strings(&["Rent", "Food"])),
            values: Some(HashMap::from([
                ("Food".to_owned(), vec![5.0, 6.0]),
                ("Rent".to_owned(), vec![1000.0, 0.0]),
            ])),
        };

        let result = prepare_category_time_series(Some(&data), &ChartConfig::default())
            .into_option()
            .unwrap();

        assert_eq!(result.labels, strings(&["2024-01-01", "2024-01-02"]));
        assert_eq!(
            result.series,
            vec![
                NamedSeries {
                    name: "Rent".to_owned(),
                    data: vec![1000.0, 0.0],
                    color: "#FF6384".to_owned(),
                },
                NamedSeries {
                    name: "Food".to_owned(),
                    data: vec![5.0, 6.0],
                    color: "#36A2EB".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn category_time_series_wraps_colours() {
        let categories: Vec<String> = (0..7).map(|i| format!("Category {i}")).collect();
        let data = CategoryTimeSeries {
            labels: Some(strings(&["2024-01-01"])),
            categories: Some(categories),
            values: Some(HashMap::new()),
        };
        let config = ChartConfig {
            palette: Palette::new(strings(&["red", "green", "blue"])).unwrap(),
            ..Default::default()
        };

        let result = prepare_category_time_series(Some(&data), &config)
            .into_option()
            .unwrap();

        let colors: Vec<&str> = result.series.iter().map(|s| s.color.as_str()).collect();
        assert_eq!(
            colors,
            vec!["red", "green", "blue", "red", "green", "blue", "red"]
        );
    }

    #[test]
    fn category_time_series_zero_fills_missing_categories() {
        let data = CategoryTimeSeries {
            labels: Some(strings(&["2024-01-01", "2024-01-02", "2024-01-03"])),
            categories: Some(strings(&["Food", "Travel", "Rent"])),
            values: Some(HashMap::from([
                ("Food".to_owned(), vec![5.0, 6.0, 7.0]),
                ("Rent".to_owned(), vec![100.0]),
            ])),
        };

        let result = prepare_category_time_series(Some(&data), &ChartConfig::default())
            .into_option()
            .unwrap();

        assert_eq!(result.series[0].data, vec![5.0, 6.0, 7.0]);
        assert_eq!(result.series[1].data, vec![0.0, 0.0, 0.0]);
        assert_eq!(result.series[2].data, vec![100.0, 0.0, 0.0]);
    }

    #[test]
    fn category_time_series_skips_without_categories() {
        let config = ChartConfig::default();
        let no_categories = CategoryTimeSeries {
            labels: Some(strings(&["2024-01-01"])),
            categories: Some(vec![]),
            values: None,
        };
        let missing_labels = CategoryTimeSeries {
            labels: None,
            categories: Some(strings(&["Food"])),
            values: None,
        };

        assert_eq!(
            prepare_category_time_series(None, &config),
            Prepared::Skip(SkipReason::MissingRecord)
        );
        assert_eq!(
            prepare_category_time_series(Some(&no_categories), &config),
            Prepared::Skip(SkipReason::EmptyField("categories"))
        );
        assert_eq!(
            prepare_category_time_series(Some(&missing_labels), &config),
            Prepared::Skip(SkipReason::MissingField("labels"))
        );
    }

    #[test]
    fn calendar_heatmap_fills_gaps_and_normalizes_intensity() {
        let data = calendar(
            &["2024-01-01", "2024-01-02", "2024-01-03"],
            &[("2024-01-01", 10.0), ("2024-01-02", 20.0)],
        );

        let result = prepare_calendar_heatmap(Some(&data)).into_option().unwrap();

        assert_eq!(result.points.len(), 3);
        assert_eq!(result.max_value, 20.0);
        assert_eq!(result.points[2].x, "2024-01-03");
        assert_eq!(result.points[2].y, 0.0);
        let intensities: Vec<f64> = result.points.iter().map(|p| p.intensity).collect();
        assert_eq!(intensities, vec![0.5, 1.0, 0.0]);
    }

    #[test]
    fn calendar_heatmap_all_zero_gives_zero_intensity() {
        let data = calendar(
            &["2024-01-01", "2024-01-02"],
            &[("2024-01-01", 0.0), ("2024-01-02", 0.0)],
        );

        let result = prepare_calendar_heatmap(Some(&data)).into_option().unwrap();

        assert_eq!(result.max_value, 0.0);
        assert!(result.points.iter().all(|point| point.intensity == 0.0));
    }

    #[test]
    fn calendar_heatmap_max_includes_dates_outside_labels() {
        let data = calendar(
            &["2024-01-01"],
            &[("2024-01-01", 10.0), ("2023-12-31", 40.0)],
        );

        let result = prepare_calendar_heatmap(Some(&data)).into_option().unwrap();

        assert_eq!(result.max_value, 40.0);
        assert_eq!(result.points[0].intensity, 0.25);
    }

    #[test]
    fn calendar_heatmap_skips_missing_or_empty_data() {
        let no_values = calendar(&["2024-01-01"], &[]);
        let no_labels = CalendarSpendingMap {
            labels: None,
            values: Some(HashMap::from([("2024-01-01".to_owned(), 1.0)])),
        };
        let empty_labels = calendar(&[], &[("2024-01-01", 5.0)]);

        assert_eq!(
            prepare_calendar_heatmap(None),
            Prepared::Skip(SkipReason::MissingRecord)
        );
        assert_eq!(
            prepare_calendar_heatmap(Some(&no_values)),
            Prepared::Skip(SkipReason::EmptyField("values"))
        );
        assert_eq!(
            prepare_calendar_heatmap(Some(&no_labels)),
            Prepared::Skip(SkipReason::MissingField("labels"))
        );
        assert_eq!(
            prepare_calendar_heatmap(Some(&empty_labels)),
            Prepared::Skip(SkipReason::EmptyField("labels"))
        );
    }

    #[test]
    fn preparing_twice_gives_identical_output() {
        let config = ChartConfig::default();
        let categories = category_set(&["Food", "Rent"], &[50.0, 1000.0]);
        let heatmap = calendar(
            &["2024-01-01", "2024-01-02"],
            &[("2024-01-01", 10.0), ("2024-01-02", 20.0)],
        );
        let trend = DailySpendingSeries {
            labels: Some(strings(&["2024-01-01", "2024-01-02"])),
            values: Some(vec![10.0, 20.0]),
        };
        let time_series = CategoryTimeSeries {
            labels: Some(strings(&["2024-01-01", "2024-01-02"])),
            categories: Some(strings(&["Rent", "Food", "Travel", "Fun", "Gifts"])),
            values: Some(HashMap::from([
                ("Food".to_owned(), vec![5.0, 6.0]),
                ("Rent".to_owned(), vec![1000.0, 0.0]),
                ("Fun".to_owned(), vec![12.0, 3.0]),
                ("Gifts".to_owned(), vec![40.0]),
            ])),
        };

        assert_eq!(
            prepare_category_breakdown(Some(&categories), &config),
            prepare_category_breakdown(Some(&categories), &config)
        );
        assert_eq!(
            prepare_daily_trend(Some(&trend), &config),
            prepare_daily_trend(Some(&trend), &config)
        );
        let first = prepare_category_time_series(Some(&time_series), &config);
        assert_eq!(first, prepare_category_time_series(Some(&time_series), &config));
        let names: Vec<String> = first
            .into_option()
            .unwrap()
            .series
            .into_iter()
            .map(|series| series.name)
            .collect();
        assert_eq!(names, strings(&["Rent", "Food", "Travel", "Fun", "Gifts"]));
        assert_eq!(
            prepare_calendar_heatmap(Some(&heatmap)),
            prepare_calendar_heatmap(Some(&heatmap))
        );
    }
}
