use super::types::{request, response};
use crate::{
    modules::{category::repository, restaurant::service as restaurant_service},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant = restaurant_service::find_owned(
        ctx.clone(),
        &payload.auth.user,
        payload.body.restaurant_id,
    )
    .await?;

    repository::create(
        &ctx.db_conn.pool,
        repository::CreateCategoryPayload {
            name: payload.body.name.trim().to_string(),
            restaurant_id: restaurant.id,
        },
    )
    .await
    .map_err(|err| match err {
        repository::Error::NameAlreadyInUse => response::Error::NameAlreadyInUse,
        repository::Error::UnexpectedError => response::Error::FailedToCreateCategory,
    })
    .map(response::Success::CategoryCreated)
}
