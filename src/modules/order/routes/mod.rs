mod assign_driver;
mod confirm_payment;
mod create;
mod delete;
mod get;
mod list;
mod payment_intent;
mod tracking;
mod update_status;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(create::get_router())
        .merge(list::get_router())
        .merge(get::get_router())
        .merge(payment_intent::get_router())
        .merge(confirm_payment::get_router())
        .merge(update_status::get_router())
        .merge(assign_driver::get_router())
        .merge(tracking::get_router())
        .merge(delete::get_router())
}
