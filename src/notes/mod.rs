pub mod handlers;
pub mod list;
pub mod local;
mod model;
mod routes;
pub mod store;
pub mod view;

pub use model::*;

use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    routes::router(state)
}
