//! The page that lists the transaction history.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    endpoints::format_endpoint,
    html::{
        BUTTON_DELETE_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, link,
    },
    navigation::NavBar,
    store::TransactionStore,
    transaction::{Transaction, TransactionFilter, TransactionKind},
};

/// The state needed for the transactions page.
#[derive(Clone)]
pub struct TransactionsPageState {
    /// The transaction store.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The query string accepted by the transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    /// Which transactions to show.
    #[serde(default)]
    pub filter: TransactionFilter,
}

/// Display the transaction history, filtered by kind.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLock)?;

    let transactions = store.list(query.filter);
    drop(store);

    Ok(transactions_view(query.filter, &transactions).into_response())
}

fn transactions_view(filter: TransactionFilter, transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex flex-wrap items-center justify-between w-full max-w-screen-lg gap-4 mb-4"
            {
                h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl"
                {
                    "Transactions"
                }

                div class="flex items-center gap-4"
                {
                    (link(endpoints::NEW_TRANSACTION_VIEW, "Add"))
                    (link(endpoints::IMPORT_VIEW, "Import"))
                    (link(endpoints::EXPORT, "Export CSV"))
                }
            }

            form
                method="get"
                action=(endpoints::TRANSACTIONS_VIEW)
                class="w-full max-w-screen-lg mb-4"
            {
                label for="filter" class="sr-only" { "Filter" }

                select
                    name="filter"
                    id="filter"
                    class={ (FORM_TEXT_INPUT_STYLE) " max-w-xs" }
                    onchange="this.form.submit()"
                {
                    @for option in TransactionFilter::ALL_FILTERS {
                        option value=(option.as_str()) selected[option == filter]
                        {
                            (option.label())
                        }
                    }
                }
            }

            @if transactions.is_empty() {
                div class="flex flex-col items-center py-8 text-gray-500 dark:text-gray-400"
                {
                    p { "Nothing to show." }
                    p
                    {
                        "Add a transaction " (link(endpoints::NEW_TRANSACTION_VIEW, "manually"))
                        " or " (link(endpoints::IMPORT_VIEW, "import a CSV file")) "."
                    }
                }
            } @else {
                div class="w-full max-w-screen-lg overflow-x-auto rounded-lg shadow"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_row(transaction))
                            }
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &[], &content)
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let amount_cell = match transaction.kind {
        TransactionKind::Income => html!(
            span class="text-green-600 dark:text-green-400 font-semibold"
            {
                "+" (format_currency(transaction.amount))
            }
        ),
        TransactionKind::Expense => html!(
            span class="text-red-600 dark:text-red-400 font-semibold"
            {
                (format_currency(-transaction.amount))
            }
        ),
    };

    let delete_url = format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.category.label()) }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class={ (TABLE_CELL_STYLE) " text-right whitespace-nowrap" } { (amount_cell) }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                {
                    "Delete"
                }
            }
        }
    )
}
