//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::{get_analysis_partial, get_dashboard_page},
    endpoints,
    export::export_transactions,
    import::{get_import_page, import_transactions},
    not_found::get_404_not_found,
    transaction::{
        create_transaction_api, create_transaction_endpoint, delete_transaction_api,
        delete_transaction_endpoint, get_new_transaction_page, get_transactions_api,
        get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::TRANSACTIONS_VIEW,
            get(get_transactions_page).post(create_transaction_endpoint),
        )
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(endpoints::IMPORT_VIEW, get(get_import_page))
        .route(endpoints::IMPORT, post(import_transactions))
        .route(endpoints::EXPORT, get(export_transactions))
        .route(endpoints::ANALYSIS, get(get_analysis_partial))
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_api).post(create_transaction_api),
        )
        .route(endpoints::TRANSACTION, delete(delete_transaction_api))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
