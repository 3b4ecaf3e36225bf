use super::{service::service, types::request};
use crate::{modules::auth::middleware::Auth, types::Context, utils::pagination::Pagination};
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

pub async fn handler(
    auth: Auth,
    State(ctx): State<Arc<Context>>,
    pagination: Pagination,
) -> impl IntoResponse {
    service(ctx, request::Payload { auth, pagination }).await
}
