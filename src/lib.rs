//! Pocketbook is a web app for tracking personal income and expenses.
//!
//! The library serves HTML pages directly (htmx for interactions, ECharts
//! for charts) and exposes a JSON API over the same transaction store. The
//! store lives in memory and is mirrored to a JSON snapshot file after
//! every mutation.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod analysis;
mod app_state;
mod dashboard;
mod endpoints;
mod export;
mod html;
mod import;
mod navigation;
mod not_found;
mod routing;
mod store;
mod summary;
mod timezone;
mod transaction;

pub use analysis::{
    Advice, AnalysisProvider, AnalysisReport, BestMonth, ExpenseHighlight, Findings,
    RuleBasedAnalysis,
};
pub use app_state::AppState;
pub use import::{CsvImportParser, ImportParser};
pub use routing::build_router;
pub use store::TransactionStore;
pub use transaction::{
    Category, Transaction, TransactionDraft, TransactionFilter, TransactionId, TransactionKind,
};

use crate::{
    alert::{Alert, render_alert},
    html::error_view,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction was created with a zero or negative amount.
    ///
    /// Amounts record how much money moved; the direction is carried by the
    /// transaction kind, so the amount itself must be positive.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// A transaction was created with an empty description.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// A string could not be parsed as a transaction kind.
    #[error("\"{0}\" is not a transaction type, expected \"income\" or \"expense\"")]
    InvalidKind(String),

    /// A string could not be parsed as one of the fixed categories.
    #[error("\"{0}\" is not a known category")]
    InvalidCategory(String),

    /// An uploaded CSV file had issues that prevented it from being parsed.
    ///
    /// The message names the offending line so the user can fix the file.
    #[error("could not parse the CSV file: {0}")]
    InvalidCsv(String),

    /// The multipart form could not be parsed as a list of files.
    #[error("could not parse multipart form: {0}")]
    MultipartError(String),

    /// The uploaded file is not a CSV file.
    #[error("file is not a CSV")]
    NotCsv,

    /// Could not acquire the lock on the transaction store.
    #[error("could not acquire the store lock")]
    StoreLock,

    /// The snapshot file could not be read or written.
    ///
    /// The detail string should be logged on the server; clients only see a
    /// generic failure notice.
    #[error("could not access the snapshot file: {0}")]
    Storage(String),

    /// The snapshot file or a response body could not be (de)serialized.
    #[error("could not serialize the transaction history: {0}")]
    Serialization(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezone(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_view(
                    "Server Error",
                    "500",
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings \
                        and ensure the timezone has been set to a valid, canonical timezone string."
                    ),
                ),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_view(
                        "Server Error",
                        "500",
                        "Sorry, something went wrong.",
                        "Try again later or check the server logs.",
                    ),
                )
                    .into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::NonPositiveAmount(amount) => render_alert(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid amount",
                    &format!("{amount} is not a valid amount. Enter an amount greater than zero."),
                ),
            ),
            Error::EmptyDescription => render_alert(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Missing description",
                    "Enter a short description of the transaction.",
                ),
            ),
            Error::InvalidCsv(detail) => render_alert(
                StatusCode::BAD_REQUEST,
                Alert::error("Could not import the file", &detail),
            ),
            Error::NotCsv => render_alert(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Could not import the file",
                    "The uploaded file is not a CSV file. Upload a CSV file and try again.",
                ),
            ),
            Error::MultipartError(detail) => {
                tracing::error!("Could not parse upload: {detail}");
                render_alert(
                    StatusCode::BAD_REQUEST,
                    Alert::error(
                        "Could not read the upload",
                        "The uploaded form could not be read. Try again with a different file.",
                    ),
                )
            }
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render_alert(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
            }
        }
    }
}
