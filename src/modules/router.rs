use super::{auth, category, driver, media, menu_item, order, payment, restaurant, user};
use crate::types::Context;
use axum::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/auth", auth::routes::get_router())
        .nest("/users", user::routes::get_router())
        .nest("/restaurants", restaurant::routes::get_router())
        .nest("/categories", category::routes::get_router())
        .nest("/menu-items", menu_item::routes::get_router())
        .nest("/media", media::routes::get_router())
        .nest("/orders", order::routes::get_router())
        .nest("/payments", payment::routes::get_router())
        .nest("/drivers", driver::routes::get_router())
}
