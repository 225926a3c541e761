//! Chart generation and rendering for the dashboard.
//!
//! This module creates the ECharts visualizations for financial data:
//! - **Spending Chart**: a doughnut of expenses grouped by category
//! - **Trend Chart**: monthly income and expense totals over time
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger,
    },
    series::{Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::{
        expense_totals_by_category, format_month_label, monthly_breakdown,
    },
    html::HeadElement,
    transaction::Transaction,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
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
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
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

/// A doughnut of expense totals grouped by category.
pub(super) fn spending_chart(transactions: &[Transaction]) -> Chart {
    let data: Vec<(f64, &'static str)> = expense_totals_by_category(transactions)
        .into_iter()
        .map(|(category, total)| (total, category.label()))
        .collect();

    Chart::new()
        .title(Title::new().text("Spending").subtext("Grouped by category"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().top("bottom"))
        .series(Pie::new().name("Expenses").radius(vec!["45%", "70%"]).data(data))
}

/// Monthly income and expense totals as two line series.
pub(super) fn trend_chart(transactions: &[Transaction]) -> Chart {
    let breakdown = monthly_breakdown(transactions);

    let labels: Vec<String> = breakdown
        .iter()
        .map(|(month, _)| format_month_label(*month))
        .collect();
    let income_values: Vec<f64> = breakdown.iter().map(|(_, totals)| totals.income).collect();
    let expense_values: Vec<f64> = breakdown.iter().map(|(_, totals)| totals.expense).collect();

    Chart::new()
        .title(Title::new().text("Cash flow").subtext("By month"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("bottom"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("12%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Line::new()
                .name("Income")
                .area_style(AreaStyle::new())
                .data(income_values),
        )
        .series(
            Line::new()
                .name("Expenses")
                .area_style(AreaStyle::new())
                .data(expense_values),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
