//! Spreadsheet export of the transaction history.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    store::TransactionStore,
    transaction::{Transaction, TransactionFilter},
};

/// The state needed to export transactions.
#[derive(Clone)]
pub struct ExportState {
    /// The transaction store.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler that downloads the transaction history as `transactions.csv`.
///
/// One row per transaction, newest first. An empty store produces just the
/// header row.
pub async fn export_transactions(State(state): State<ExportState>) -> Response {
    let store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLock.into_response();
        }
    };

    let transactions = store.list(TransactionFilter::All);
    drop(store);

    match write_csv(&transactions) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"transactions.csv\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not export transactions: {error}");
            error.into_response()
        }
    }
}

fn write_csv(transactions: &[Transaction]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["Date", "Type", "Category", "Amount", "Description"])
        .map_err(|error| Error::Storage(error.to_string()))?;

    for transaction in transactions {
        writer
            .write_record([
                transaction.date.to_string(),
                transaction.kind.label().to_string(),
                transaction.category.label().to_string(),
                format!("{:.2}", transaction.amount),
                transaction.description.clone(),
            ])
            .map_err(|error| Error::Storage(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::Storage(error.to_string()))
}

#[cfg(test)]
mod export_tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::Response};
    use tempfile::TempDir;
    use time::macros::date;

    use crate::{
        store::TransactionStore,
        transaction::{Category, Transaction, TransactionKind},
    };

    use super::{ExportState, export_transactions};

    fn get_test_state() -> (TempDir, ExportState) {
        let temp_dir = TempDir::new().unwrap();
        let store = TransactionStore::load(temp_dir.path().join("transactions.json")).unwrap();

        (
            temp_dir,
            ExportState {
                store: Arc::new(Mutex::new(store)),
            },
        )
    }

    async fn body_text(response: Response<Body>) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn export_is_a_csv_attachment() {
        let (_temp_dir, state) = get_test_state();

        let response = export_transactions(State(state)).await;

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "text/csv; charset=utf-8");

        let content_disposition = response.headers().get("content-disposition").unwrap();
        assert_eq!(
            content_disposition,
            "attachment; filename=\"transactions.csv\""
        );
    }

    #[tokio::test]
    async fn empty_store_exports_only_the_header_row() {
        let (_temp_dir, state) = get_test_state();

        let response = export_transactions(State(state)).await;

        let text = body_text(response).await;
        assert_eq!(text, "Date,Type,Category,Amount,Description\n");
    }

    #[tokio::test]
    async fn exports_one_row_per_transaction_newest_first() {
        let (_temp_dir, state) = get_test_state();
        {
            let mut store = state.store.lock().unwrap();
            store
                .add(
                    Transaction::draft(
                        TransactionKind::Income,
                        Category::Salary,
                        1000.0,
                        date!(2023 - 11 - 01),
                        "October pay",
                    )
                    .unwrap(),
                )
                .unwrap();
            store
                .add(
                    Transaction::draft(
                        TransactionKind::Expense,
                        Category::Shopping,
                        7500.5,
                        date!(2023 - 11 - 12),
                        "New laptop",
                    )
                    .unwrap(),
                )
                .unwrap();
        }

        let response = export_transactions(State(state)).await;

        let text = body_text(response).await;
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Date,Type,Category,Amount,Description");
        assert_eq!(lines[1], "2023-11-12,Expense,Shopping,7500.50,New laptop");
        assert_eq!(lines[2], "2023-11-01,Income,Salary,1000.00,October pay");
    }
}
