//! The JSON API over the transaction store.
//!
//! The API and the HTML views operate on the same store, so records created
//! here show up in the UI and vice versa.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use time::Date;

use crate::{
    AppState, Error,
    store::TransactionStore,
    transaction::{Category, Transaction, TransactionFilter, TransactionId, TransactionKind},
};

/// The state needed by the JSON API endpoints.
#[derive(Clone)]
pub struct TransactionApiState {
    /// The transaction store.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for TransactionApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The body accepted by [create_transaction_api].
#[derive(Debug, Deserialize)]
pub struct NewTransactionRequest {
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The category the transaction belongs to.
    pub category: Category,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// Text detailing the transaction.
    pub description: String,
    /// The date when the transaction occurred.
    pub date: Date,
}

/// A route handler that returns every transaction as JSON, newest first.
pub async fn get_transactions_api(State(state): State<TransactionApiState>) -> Response {
    let store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, &Error::StoreLock);
        }
    };

    Json(store.list(TransactionFilter::All)).into_response()
}

/// A route handler that creates a transaction and echoes it back with its
/// assigned id.
pub async fn create_transaction_api(
    State(state): State<TransactionApiState>,
    Json(request): Json<NewTransactionRequest>,
) -> Response {
    let draft = match Transaction::draft(
        request.kind,
        request.category,
        request.amount,
        request.date,
        &request.description,
    ) {
        Ok(draft) => draft,
        Err(error) => return json_error(StatusCode::BAD_REQUEST, &error),
    };

    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, &Error::StoreLock);
        }
    };

    match store.add(draft) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, &error)
        }
    }
}

/// A route handler that deletes a transaction by id.
///
/// Deleting an id that is not in the store is a no-op and still returns
/// 204, so deletes are safe to retry.
pub async fn delete_transaction_api(
    State(state): State<TransactionApiState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, &Error::StoreLock);
        }
    };

    match store.remove(transaction_id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, &error)
        }
    }
}

fn json_error(status_code: StatusCode, error: &Error) -> Response {
    (status_code, Json(json!({ "error": error.to_string() }))).into_response()
}
