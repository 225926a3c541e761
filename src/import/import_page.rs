//! The import page and the endpoint that receives uploaded CSV files.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    AppState, Error,
    alert::{Alert, render_alert},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, base},
    import::parser::{CsvImportParser, ImportParser},
    navigation::NavBar,
    store::TransactionStore,
};

/// The state needed to import transactions.
#[derive(Clone)]
pub struct ImportState {
    /// The transaction store.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Renders the page for uploading CSV files.
pub async fn get_import_page() -> Response {
    let nav_bar = NavBar::new(endpoints::IMPORT_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl my-4"
            {
                "Import Transactions"
            }

            p class="mb-4 text-sm text-gray-600 dark:text-gray-400"
            {
                "Upload CSV files with the columns "
                code { "date,type,category,amount,description" }
                ". Files exported from the transactions page import unchanged."
            }

            form
                class="w-full space-y-4"
                hx-post=(endpoints::IMPORT)
                hx-encoding="multipart/form-data"
                hx-target="#alert-container"
                hx-target-error="#alert-container"
            {
                div
                {
                    label for="files" class=(FORM_LABEL_STYLE) { "CSV files" }

                    input
                        type="file"
                        name="files"
                        id="files"
                        accept=".csv"
                        multiple
                        required;
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Import" }
            }
        }
    );

    base("Import", &[], &content).into_response()
}

/// Receives uploaded CSV files and adds their transactions to the store.
///
/// Every file is parsed before anything is stored; a parse failure anywhere
/// abandons the whole import so a file never half-applies.
pub async fn import_transactions(
    State(state): State<ImportState>,
    mut multipart: Multipart,
) -> Response {
    let mut drafts = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(error) => return Error::MultipartError(error.to_string()).into_alert_response(),
        };

        let file_name = field.file_name().unwrap_or_default().to_owned();

        if !file_name.to_lowercase().ends_with(".csv") {
            return Error::NotCsv.into_alert_response();
        }

        let text = match field.text().await {
            Ok(text) => text,
            Err(error) => return Error::MultipartError(error.to_string()).into_alert_response(),
        };

        match CsvImportParser.parse(&text) {
            Ok(mut file_drafts) => drafts.append(&mut file_drafts),
            Err(error) => return error.into_alert_response(),
        }
    }

    if drafts.is_empty() {
        return render_alert(
            StatusCode::BAD_REQUEST,
            Alert::error(
                "Nothing to import",
                "No transactions were found in the uploaded files.",
            ),
        );
    }

    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLock.into_alert_response();
        }
    };

    match store.add_all(drafts) {
        Ok(count) => {
            tracing::info!("Imported {count} transactions");
            render_alert(
                StatusCode::OK,
                Alert::success(
                    "Import complete",
                    &format!("Added {count} transactions from the uploaded files."),
                ),
            )
        }
        Err(error) => {
            tracing::error!("Could not store imported transactions: {error}");
            error.into_alert_response()
        }
    }
}
