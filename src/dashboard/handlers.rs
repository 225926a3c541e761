//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for displaying the dashboard and refreshing the analysis
//! - HTML view functions for rendering the dashboard UI

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    analysis::{Advice, AnalysisProvider, AnalysisReport, TARGET_SAVINGS_RATE},
    dashboard::{
        aggregation::format_month_label,
        cards::summary_cards,
        charts::{DashboardChart, charts_script, charts_view, spending_chart, trend_chart},
    },
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, format_currency, link},
    navigation::NavBar,
    store::TransactionStore,
    summary::Summary,
    transaction::{Transaction, TransactionFilter},
};

/// The state needed for the dashboard page.
#[derive(Clone)]
pub struct DashboardState {
    /// The transaction store.
    pub store: Arc<Mutex<TransactionStore>>,
    /// The analysis provider used for the analysis panel.
    pub analysis: Arc<dyn AnalysisProvider>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            analysis: state.analysis.clone(),
        }
    }
}

/// Display a page with an overview of the user's data.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let transactions = list_all_transactions(&state)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let summary = Summary::of(&transactions);
    let charts = build_dashboard_charts(&transactions);
    let report = state.analysis.analyze(&transactions);

    Ok(dashboard_view(nav_bar, &summary, &charts, &report).into_response())
}

/// Re-run the analysis and return the updated panel content for htmx.
pub async fn get_analysis_partial(State(state): State<DashboardState>) -> Result<Response, Error> {
    let transactions = list_all_transactions(&state)?;

    let report = state.analysis.analyze(&transactions);

    Ok(analysis_content(&report).into_response())
}

fn list_all_transactions(state: &DashboardState) -> Result<Vec<Transaction>, Error> {
    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLock)?;

    Ok(store.list(TransactionFilter::All))
}

/// Creates the array of dashboard charts from transaction data.
fn build_dashboard_charts(transactions: &[Transaction]) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "spending-chart",
            options: spending_chart(transactions).to_string(),
        },
        DashboardChart {
            id: "trend-chart",
            options: trend_chart(transactions).to_string(),
        },
    ]
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "manually");
    let import_transaction_link = link(endpoints::IMPORT_VIEW, "importing");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "The summary and charts will show up here once you add some
                transactions. You can add transactions " (new_transaction_link) " or
                by " (import_transaction_link) " a CSV file."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with summary cards, charts, and the
/// analysis panel.
fn dashboard_view(
    nav_bar: NavBar,
    summary: &Summary,
    charts: &[DashboardChart],
    report: &AnalysisReport,
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class={ (PAGE_CONTAINER_STYLE) " max-w-screen-xl" }
        {
            (summary_cards(summary))

            (charts_view(charts))

            (analysis_panel(report))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(
            "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js".to_owned(),
        ),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}

fn analysis_panel(report: &AnalysisReport) -> Markup {
    html!(
        section id="analysis" class="w-full mx-auto mb-8"
        {
            div class="flex items-center justify-between mb-4"
            {
                h3 class="text-xl font-semibold" { "Analysis" }

                button
                    class="px-4 py-2 text-sm bg-blue-500 dark:bg-blue-600 hover:bg-blue-600
                        hover:dark:bg-blue-700 text-white rounded"
                    hx-get=(endpoints::ANALYSIS)
                    hx-target="#analysis-content"
                    hx-swap="innerHTML"
                    hx-target-error="#alert-container"
                {
                    "Refresh"
                }
            }

            div
                id="analysis-content"
                class="bg-gray-50 dark:bg-gray-800 p-4 rounded-lg"
            {
                (analysis_content(report))
            }
        }
    )
}

/// Renders the findings of an analysis run.
///
/// Also returned on its own by [get_analysis_partial] for htmx refreshes.
fn analysis_content(report: &AnalysisReport) -> Markup {
    let findings = match report {
        AnalysisReport::Empty => {
            return html!(
                p { "Add some transactions to run the analysis." }
            );
        }
        AnalysisReport::Findings(findings) => findings,
    };

    html!(
        p class="mb-2" { "Based on your " (findings.transaction_count) " transactions:" }

        ul class="list-disc list-inside space-y-1"
        {
            li
            {
                "Your current balance: "
                strong { (format_currency(findings.balance)) }
            }

            li
            {
                "Your savings rate: "
                strong { (findings.savings_rate) "%" }
                " of income"
            }

            @if let Some(top) = findings.top_expenses.first() {
                li
                {
                    "Largest expense category: "
                    strong { (top.category.label()) }
                    " (" (top.percent_of_expenses) "% of all expenses)"
                }
            }

            @match findings.advice {
                Advice::GrowSavings => {
                    li
                    {
                        "Recommendation: try cutting back on entertainment and shopping
                        to bring your savings rate up to " (TARGET_SAVINGS_RATE) "%"
                    }
                }
                Advice::KeepItUp => {
                    li
                    {
                        "Great result! You are keeping more than " (TARGET_SAVINGS_RATE) "%
                        of your income"
                    }
                }
            }

            @if let Some(best_month) = &findings.best_month {
                li
                {
                    "Most profitable month: "
                    strong { (format_month_label(best_month.month)) }
                    " (income: " (format_currency(best_month.income)) ")"
                }
            }
        }
    )
}
