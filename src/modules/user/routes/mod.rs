mod location;
mod profile;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(profile::get_router())
        .merge(location::get_router())
}
