//! Dashboard page rendering.
//!
//! This module contains:
//! - Assembly of the dashboard charts from a spending summary
//! - HTML view functions for the chart tabs and the page itself
//! - The `switchChart` script used by the tabs

use maud::{Markup, PreEscaped, html};

use crate::{
    adapter::{
        prepare_calendar_heatmap, prepare_category_breakdown, prepare_category_time_series,
        prepare_daily_trend,
    },
    aggregate::SpendingSummary,
    config::ChartConfig,
    dashboard::{
        ChartKind,
        charts::{
            ChartOptions, DashboardChart, calendar_heatmap_chart, category_breakdown_chart,
            category_time_series_chart, charts_script, charts_view, daily_trend_chart,
        },
    },
    html::{ECHARTS_SCRIPT_URL, HeadElement, PAGE_CONTAINER_STYLE, TAB_BUTTON_STYLE, base},
};

/// Hides every chart container, then shows the one for `chartType`.
const SWITCH_CHART_SCRIPT: &str = r#"
function switchChart(chartType) {
    const chartContainers = document.querySelectorAll('.chart-container');
    chartContainers.forEach(container => {
        container.style.display = 'none';
    });

    const container = document.getElementById(`${chartType}Container`);
    if (container) {
        container.style.display = 'block';
        document.dispatchEvent(new Event('chartswitched'));
    }
}
"#;

/// Render the spending dashboard as a complete HTML page.
///
/// Charts whose data is missing or empty are left out. `initial` selects the
/// chart shown first; if it is `None` or was left out, the first remaining
/// chart is shown. When no chart has data, a placeholder page is returned.
pub fn render_dashboard(
    summary: &SpendingSummary,
    config: &ChartConfig,
    initial: Option<ChartKind>,
) -> Markup {
    let charts = build_dashboard_charts(summary, config);

    let Some(first) = charts.first() else {
        tracing::info!("No chart has data, rendering the placeholder page");
        return dashboard_no_data_view();
    };

    let visible = match initial {
        Some(kind) if charts.iter().any(|chart| chart.kind == kind) => kind,
        Some(kind) => {
            tracing::info!("The {kind} chart has no data, showing the {} chart", first.kind);
            first.kind
        }
        None => first.kind,
    };

    let total = summary
        .total_spending()
        .map(|total| config.currency.format(total));

    dashboard_view(&charts, visible, total.as_deref())
}

/// Builds every chart that has data, in tab order.
fn build_dashboard_charts(summary: &SpendingSummary, config: &ChartConfig) -> Vec<DashboardChart> {
    ChartKind::ALL
        .into_iter()
        .filter_map(|kind| build_chart(kind, summary, config))
        .collect()
}

fn build_chart(
    kind: ChartKind,
    summary: &SpendingSummary,
    config: &ChartConfig,
) -> Option<DashboardChart> {
    let options = ChartOptions::for_kind(kind, config);

    let chart = match kind {
        ChartKind::Pie => {
            let data =
                prepare_category_breakdown(summary.category_spending.as_ref(), config).into_option()?;
            category_breakdown_chart(&data, &options)
        }
        ChartKind::Line => {
            let data = prepare_daily_trend(summary.daily_spending.as_ref(), config).into_option()?;
            daily_trend_chart(&data, &options, config)
        }
        ChartKind::StackedLine => {
            let data =
                prepare_category_time_series(summary.category_daily_spending.as_ref(), config)
                    .into_option()?;
            category_time_series_chart(&data, &options, config)
        }
        ChartKind::Calendar => {
            let data = prepare_calendar_heatmap(summary.calendar_spending.as_ref()).into_option()?;
            calendar_heatmap_chart(&data, &options, config)
        }
    };

    Some(DashboardChart::new(kind, &chart, &options))
}

/// Renders the dashboard page when no chart has data.
fn dashboard_no_data_view() -> Markup {
    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once there is some spending to summarise."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the dashboard with a tab per chart.
///
/// # Arguments
/// * `charts` - The charts to show, at least one
/// * `visible` - The chart shown when the page loads
/// * `total` - The formatted total spending, if known
fn dashboard_view(charts: &[DashboardChart], visible: ChartKind, total: Option<&str>) -> Markup {
    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        HeadElement::ScriptSource(PreEscaped(SWITCH_CHART_SCRIPT.to_owned())),
        charts_script(charts),
    ];

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-2" { "Spending" }

            @if let Some(total) = total {
                p id="total-spending" class="mb-4"
                {
                    "Total spending: " strong { (total) }
                }
            }

            nav id="chart-tabs" class="flex flex-wrap gap-2"
            {
                @for chart in charts {
                    button
                        type="button"
                        class=(TAB_BUTTON_STYLE)
                        onclick=(format!("switchChart('{}')", chart.kind.name()))
                    {
                        (chart.kind.tab_label())
                    }
                }
            }

            (charts_view(charts, visible))
        }
    );

    base("Dashboard", &scripts, &content)
}
