use super::{service::service, types::request};
use crate::types::Context;
use axum::{extract::State, response::IntoResponse};
use axum_extra::TypedHeader;
use bytes::Bytes;
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    TypedHeader(signature): TypedHeader<request::Headers>,
    body: Bytes,
) -> impl IntoResponse {
    service(ctx, request::Payload { signature, body }).await
}
