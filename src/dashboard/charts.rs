//! Chart generation and rendering for the spending dashboard.
//!
//! This module turns prepared chart data into ECharts visualizations:
//! - **Spending by Category**: Pie chart of totals per category
//! - **Daily Spending Trend**: Filled line chart of daily totals
//! - **Daily Spending by Category**: Stacked line chart, one series per category
//! - **Daily Spending Calendar**: Bar chart shaded by relative daily spending
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus,
        ItemStyle, JsFunction, LineStyle, Orient, Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::{Markup, PreEscaped, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    adapter::{CalendarHeatmap, CategoryBreakdown, CategoryTimeSeriesInput, DailyTrend},
    config::{Animation, ChartConfig, CurrencyFormat},
    dashboard::ChartKind,
    html::HeadElement,
};

/// Where a chart's legend is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LegendPosition {
    Top,
    Right,
}

/// The presentation options recognised for a dashboard chart.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ChartOptions {
    /// Title shown above the chart, no title when `None`.
    pub title: Option<&'static str>,
    /// Legend placement, no legend when `None`.
    pub legend: Option<LegendPosition>,
    /// Whether series are stacked on top of each other.
    pub stacked: bool,
    /// Entry animation, ECharts defaults when `None`.
    pub animation: Option<Animation>,
}

impl ChartOptions {
    /// The standard options for `kind`.
    pub fn for_kind(kind: ChartKind, config: &ChartConfig) -> Self {
        let (title, legend, stacked, duration_ms) = match kind {
            ChartKind::Pie => ("Spending by Category", Some(LegendPosition::Right), false, 1000),
            ChartKind::Line => ("Daily Spending Trend", Some(LegendPosition::Top), false, 2000),
            ChartKind::StackedLine => (
                "Daily Spending by Category",
                Some(LegendPosition::Top),
                true,
                1000,
            ),
            ChartKind::Calendar => ("Daily Spending Calendar", None, false, 1000),
        };

        Self {
            title: Some(title),
            legend,
            stacked,
            animation: config.animate.then(|| Animation::new(duration_ms)),
        }
    }

    /// A chart with the title and legend applied.
    fn base_chart(&self) -> Chart {
        let mut chart = Chart::new();

        if let Some(title) = self.title {
            chart = chart.title(Title::new().text(title).left(20).top("1%"));
        }

        match self.legend {
            Some(LegendPosition::Top) => chart = chart.legend(Legend::new().left(250).top("1%")),
            Some(LegendPosition::Right) => {
                chart = chart.legend(
                    Legend::new()
                        .orient(Orient::Vertical)
                        .right(20)
                        .top("middle"),
                )
            }
            None => {}
        }

        chart
    }
}

/// A dashboard chart with its kind and ECharts configuration.
pub(super) struct DashboardChart {
    /// Which chart this is, determines the HTML element IDs
    pub kind: ChartKind,
    /// The ECharts configuration as a JSON string
    pub options: String,
    /// The entry animation applied when the chart is initialised
    pub animation: Option<Animation>,
}

impl DashboardChart {
    pub fn new(kind: ChartKind, chart: &Chart, options: &ChartOptions) -> Self {
        Self {
            kind,
            options: escape_script_text(&chart.to_string()),
            animation: options.animation,
        }
    }
}

/// Escapes chart options for embedding in an inline `<script>`.
///
/// Labels come from user data, so `</script>` or `<!--` inside a string
/// would otherwise end the script element early.
fn escape_script_text(options: &str) -> String {
    options.replace("</", "<\\/").replace("<!--", "<\\!--")
}

/// Renders the HTML containers for dashboard charts.
///
/// Only the container for `visible` is shown, the others are hidden until
/// selected with `switchChart`.
///
/// # Arguments
/// * `charts` - The charts to render containers for
/// * `visible` - The chart to show initially
///
/// # Returns
/// Maud markup containing one container div per chart.
pub(super) fn charts_view(charts: &[DashboardChart], visible: ChartKind) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            @for chart in charts {
                div
                    id=(chart.kind.container_id())
                    class="chart-container"
                    style=(if chart.kind == visible { "display: block" } else { "display: none" })
                {
                    div
                        id=(chart.kind.chart_id())
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
///
/// # Arguments
/// * `charts` - The charts to generate initialization scripts for
///
/// # Returns
/// HeadElement containing the initialization JavaScript.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            let animation = chart
                .animation
                .map(|animation| {
                    format!(
                        "option.animationDuration = {};\n                    option.animationEasing = '{}';",
                        animation.duration_ms,
                        animation.easing.as_str()
                    )
                })
                .unwrap_or_default();

            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    {}
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);
                    // Hidden charts have no size until their container is shown
                    document.addEventListener('chartswitched', () => chart.resize());

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.kind.chart_id(),
                chart.options,
                animation
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn category_breakdown_chart(data: &CategoryBreakdown, options: &ChartOptions) -> Chart {
    let slices: Vec<DataPointItem> = data
        .labels
        .iter()
        .zip(&data.values)
        .zip(&data.colors)
        .map(|((label, &value), color)| {
            DataPointItem::new(value)
                .name(label.as_str())
                .item_style(ItemStyle::new().color(color.as_str()))
        })
        .collect();

    options
        .base_chart()
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .series(
            Pie::new()
                .name("Spending")
                .radius("60%")
                .center(vec!["40%", "55%"])
                .data(slices),
        )
}

pub(super) fn daily_trend_chart(
    data: &DailyTrend,
    options: &ChartOptions,
    config: &ChartConfig,
) -> Chart {
    options
        .base_chart()
        .tooltip(currency_tooltip(&config.currency))
        .grid(standard_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(data.labels.clone()))
        .y_axis(currency_axis(&config.currency))
        .series(
            Line::new()
                .name("Daily Spending")
                .smooth(true)
                .item_style(ItemStyle::new().color(data.color.as_str()))
                .line_style(LineStyle::new().width(2).color(data.color.as_str()))
                .area_style(AreaStyle::new().color(config.primary_color.with_alpha(0.1).as_str()))
                .data(data.values.clone()),
        )
}

pub(super) fn category_time_series_chart(
    data: &CategoryTimeSeriesInput,
    options: &ChartOptions,
    config: &ChartConfig,
) -> Chart {
    let mut chart = options
        .base_chart()
        .tooltip(currency_tooltip(&config.currency))
        .grid(standard_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(data.labels.clone()))
        .y_axis(currency_axis(&config.currency));

    for series in &data.series {
        let mut line = Line::new()
            .name(series.name.as_str())
            .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
            .item_style(ItemStyle::new().color(series.color.as_str()))
            .line_style(LineStyle::new().width(2).color(series.color.as_str()))
            .data(series.data.clone());

        if options.stacked {
            line = line.stack("Spending");
        }

        chart = chart.series(line);
    }

    chart
}

pub(super) fn calendar_heatmap_chart(
    data: &CalendarHeatmap,
    options: &ChartOptions,
    config: &ChartConfig,
) -> Chart {
    let labels: Vec<String> = data.points.iter().map(|point| day_label(&point.x)).collect();

    let bars: Vec<DataPointItem> = data
        .points
        .iter()
        .map(|point| {
            let fill = config.primary_color.with_alpha(point.intensity);

            DataPointItem::new(point.y)
                .name(point.x.as_str())
                .item_style(ItemStyle::new().color(fill.as_str()))
        })
        .collect();

    options
        .base_chart()
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .formatter(date_currency_formatter(&config.currency)),
        )
        .grid(standard_grid())
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Date")
                .data(labels),
        )
        .y_axis(currency_axis(&config.currency))
        .series(bar::Bar::new().name("Daily Spending").data(bars))
}

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DAY_LABEL: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none]");

/// Formats an ISO date such as "2024-01-05" as "Jan 5".
///
/// Strings that are not ISO dates are returned unchanged.
fn day_label(date: &str) -> String {
    match Date::parse(date, ISO_DATE) {
        Ok(parsed) => parsed.format(DAY_LABEL).unwrap_or_else(|_| date.to_owned()),
        Err(error) => {
            tracing::warn!("Could not parse \"{date}\" as a date, using it as the label: {error}");
            date.to_owned()
        }
    }
}

fn standard_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .top(90)
        .contain_label(true)
}

fn currency_axis(currency: &CurrencyFormat) -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .axis_label(AxisLabel::new().formatter(currency.js_formatter()))
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip(currency: &CurrencyFormat) -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency.js_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

/// Formats a heatmap tooltip as the localized date followed by the amount.
fn date_currency_formatter(currency: &CurrencyFormat) -> JsFunction {
    JsFunction::new_with_args(
        "params",
        &format!(
            "const formatAmount = (value) => {{ {} }};
            const raw = (params.data && params.data.name) || params.name;
            const date = new Date(raw);
            const title = isNaN(date.getTime()) ? raw : date.toLocaleDateString();
            return title + '<br/>' + formatAmount(params.value);",
            currency.js_body()
        ),
    )
}
