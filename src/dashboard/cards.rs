//! The summary cards at the top of the dashboard.

use maud::{Markup, html};

use crate::{html::format_currency, summary::Summary};

const CARD_STYLE: &str = "flex flex-col gap-2 p-4 bg-white rounded-lg shadow dark:bg-gray-800";

/// Renders the balance, income, and expense cards.
///
/// The income and expense cards carry a proportion bar showing each side's
/// share of overall turnover.
pub(super) fn summary_cards(summary: &Summary) -> Markup {
    html!(
        section id="summary" class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 md:grid-cols-3 gap-4"
            {
                div class=(CARD_STYLE)
                {
                    span class="text-sm text-gray-500 dark:text-gray-400" { "Balance" }
                    span class="text-2xl font-bold" { (format_currency(summary.balance)) }
                }

                (proportion_card(
                    "Income",
                    summary.income,
                    summary.income_percent,
                    "bg-green-500",
                ))

                (proportion_card(
                    "Expenses",
                    summary.expense,
                    summary.expense_percent,
                    "bg-red-500",
                ))
            }
        }
    )
}

fn proportion_card(title: &str, amount: f64, percent: i64, bar_color: &str) -> Markup {
    html!(
        div class=(CARD_STYLE)
        {
            span class="text-sm text-gray-500 dark:text-gray-400" { (title) }

            div class="flex items-baseline justify-between"
            {
                span class="text-2xl font-bold" { (format_currency(amount)) }
                span class="text-sm text-gray-500 dark:text-gray-400" { (percent) "%" }
            }

            div class="w-full bg-gray-200 rounded-full h-2.5 dark:bg-gray-700"
            {
                div
                    class={ "h-2.5 rounded-full " (bar_color) }
                    style={ "width: " (percent) "%" }
                {}
            }
        }
    )
}
