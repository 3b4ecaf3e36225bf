use super::types::{request, response};
use crate::{modules::user::repository, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    repository::update_by_id(
        &ctx.db_conn.pool,
        payload.auth.user.id,
        repository::UpdateUserPayload {
            first_name: payload.body.first_name,
            last_name: payload.body.last_name,
            phone_number: payload.body.phone_number,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateUser)
    .map(response::Success::UserUpdated)
}
