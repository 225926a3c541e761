//! Defines the endpoint the transactions page uses to delete a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::IntoResponse,
};
use maud::html;

use crate::{AppState, Error, store::TransactionStore, transaction::TransactionId};

/// The state needed to delete a transaction.
#[derive(Clone)]
pub struct DeleteTransactionState {
    /// The transaction store.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for deleting a transaction from the transactions page.
///
/// Responds with an empty body that htmx swaps over the deleted table row.
/// Deleting an id that is no longer in the store gets the same response, so
/// a row that was already removed elsewhere still disappears.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> impl IntoResponse {
    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLock.into_alert_response();
        }
    };

    match store.remove(transaction_id) {
        // The status code has to be 200 OK or htmx will not swap out the table row.
        Ok(_) => html!().into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
