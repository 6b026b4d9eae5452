//! Application router configuration.

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, Error,
    budget::get_summary_endpoint,
    endpoints,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Cross-origin requests are allowed from any origin so that a browser
/// client served from elsewhere can call the API.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
        .route(endpoints::SUMMARY_API, get(get_summary_endpoint))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
