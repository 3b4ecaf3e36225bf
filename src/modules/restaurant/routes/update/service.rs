use super::types::{request, response};
use crate::{
    modules::restaurant::{repository, service as restaurant_service},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant =
        restaurant_service::find_owned(ctx.clone(), &payload.auth.user, payload.id).await?;

    repository::update_by_id(
        &ctx.db_conn.pool,
        restaurant.id,
        repository::UpdateRestaurantPayload {
            name: payload.body.name,
            description: payload.body.description,
            address: payload.body.address,
            phone_number: payload.body.phone_number,
            opening_time: payload.body.opening_time,
            closing_time: payload.body.closing_time,
            is_open: payload.body.is_open,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateRestaurant)
    .map(response::Success::RestaurantUpdated)
}
