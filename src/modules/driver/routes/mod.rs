mod assigned_orders;
mod availability;
mod available_orders;
mod location;
mod me;
mod ping_location;
mod register;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(register::get_router())
        .merge(me::get_router())
        .merge(availability::get_router())
        .merge(ping_location::get_router())
        .merge(assigned_orders::get_router())
        .merge(available_orders::get_router())
        .merge(location::get_router())
}
