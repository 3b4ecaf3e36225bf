use super::handler;
use crate::types::Context;
use axum::routing::{get, Router};
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/sign-in", get(handler::sign_in))
        .route("/sign-up", get(handler::sign_up))
        .route("/auth/complete", get(handler::auth_complete))
        .route("/dashboard/customer", get(handler::customer_dashboard))
        .route("/dashboard/restaurant", get(handler::restaurant_dashboard))
        .route("/dashboard/driver", get(handler::driver_dashboard))
}
