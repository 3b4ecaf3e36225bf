use super::types::{request, response};
use crate::{
    modules::{
        location::repository::{self as location, Owner},
        restaurant::{repository, service as restaurant_service},
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

    let owner_id = restaurant_service::find_owner_id(ctx.clone(), &payload.auth.user).await?;
    let body = payload.body;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToCreateRestaurant
    })?;

    let restaurant = repository::create(
        &mut *tx,
        repository::CreateRestaurantPayload {
            name: body.name,
            description: body.description,
            address: body.address,
            phone_number: body.phone_number,
            opening_time: body.opening_time,
            closing_time: body.closing_time,
            owner_id,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateRestaurant)?;

    if let (Some(latitude), Some(longitude)) = (body.latitude, body.longitude) {
        location::upsert(
            &mut *tx,
            Owner::Restaurant(restaurant.id.clone()),
            Coordinates::new(latitude, longitude),
        )
        .await
        .map_err(|_| response::Error::FailedToCreateRestaurant)?;
    }

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToCreateRestaurant
    })?;

    Ok(response::Success::RestaurantCreated(restaurant))
}
