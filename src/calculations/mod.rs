pub mod dto;
pub mod handlers;
pub mod operation;
mod repo;
pub mod repo_types;
mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::calculation_routes())
}
