mod google;
mod google_callback;
mod refresh;
mod sign_in;
mod sign_up;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(sign_up::get_router())
        .merge(sign_in::get_router())
        .merge(refresh::get_router())
        .merge(google::get_router())
        .merge(google_callback::get_router())
}
