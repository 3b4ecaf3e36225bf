mod destroy;
mod upload;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(upload::get_router())
        .merge(destroy::get_router())
}
