mod create;
mod delete;
mod get;
mod list;
mod nearby;
mod update;
mod update_cover_image;
mod update_location;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(create::get_router())
        .merge(list::get_router())
        .merge(nearby::get_router())
        .merge(get::get_router())
        .merge(update::get_router())
        .merge(update_cover_image::get_router())
        .merge(update_location::get_router())
        .merge(delete::get_router())
}
