mod home;
mod pages;
mod restaurant;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(home::get_router())
        .merge(restaurant::get_router())
        .merge(pages::get_router())
}
