//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with the summary, charts, and analysis.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for displaying the transaction history.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for importing transactions from a CSV file.
pub const IMPORT_VIEW: &str = "/transactions/import";
/// The route the transactions page uses to delete a single transaction.
pub const DELETE_TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to access transactions as JSON.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to access a single transaction as JSON.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to upload a CSV file for importing transactions.
pub const IMPORT: &str = "/api/import";
/// The route to download the transaction history as a spreadsheet.
pub const EXPORT: &str = "/api/export";
/// The route to re-run the analysis and fetch the updated partial.
pub const ANALYSIS: &str = "/api/analysis";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
