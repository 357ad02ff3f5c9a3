pub mod admin;
pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod public;

use axum::Router;

use crate::adapters::http::app_state::AppState;

pub fn router(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/dashboard", dashboard::router())
        .nest("/billing", billing::router())
        .nest("/public", public::router())
        .nest("/admin", admin::router(app_state))
}
