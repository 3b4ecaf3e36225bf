use super::types::{request, response};
use crate::{
    modules::{
        location::repository::{self as location, Owner},
        restaurant::service as restaurant_service,
    },
    types::Context,
    utils::geo::Coordinates,
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

    location::upsert(
        &ctx.db_conn.pool,
        Owner::Restaurant(restaurant.id),
        Coordinates::new(payload.body.latitude, payload.body.longitude),
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateLocation)
    .map(response::Success::LocationUpdated)
}
