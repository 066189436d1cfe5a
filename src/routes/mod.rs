use axum::Router;

use crate::state::AppState;

pub mod agenda;
pub mod customers;
pub mod doc;
pub mod health;
pub mod params;
pub mod permissions;
pub mod reports;
pub mod settings;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/agenda", agenda::router())
        .nest("/customers", customers::router())
        .nest("/settings", settings::router())
        .nest("/permissions", permissions::router())
        .nest("/reports", reports::router())
}
