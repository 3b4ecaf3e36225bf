use super::types::{request, response};
use crate::{
    modules::category::{repository, service as category_service},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let category = category_service::find_owned(ctx.clone(), &payload.auth.user, payload.id).await?;

    repository::update_by_id(
        &ctx.db_conn.pool,
        category.id,
        payload.body.name.trim().to_string(),
    )
    .await
    .map_err(|err| match err {
        repository::Error::NameAlreadyInUse => response::Error::NameAlreadyInUse,
        repository::Error::UnexpectedError => response::Error::FailedToUpdateCategory,
    })
    .map(response::Success::CategoryUpdated)
}
