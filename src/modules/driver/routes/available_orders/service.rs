use super::types::{request, response};
use crate::{
    modules::{
        driver::service as driver_service,
        location::repository::{self as location, Owner},
        order::repository as order,
    },
    types::Context,
    utils::geo::{self, Coordinates},
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.params.validate().map_err(|errors| {
        tracing::warn!("Failed to validate params: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let driver = driver_service::find_registered(ctx.clone(), &payload.auth.user).await?;

    // falls back to the last ping when the client does not send its position
    let origin = match (payload.params.latitude, payload.params.longitude) {
        (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude),
        _ => location::find_by_owner(&ctx.db_conn.pool, Owner::Driver(driver.id))
            .await
            .map_err(|_| response::Error::FailedToFetchOrders)?
            .map(|location| location.coordinates())
            .ok_or(response::Error::LocationUnknown)?,
    };

    let orders = order::find_awaiting_driver(&ctx.db_conn.pool)
        .await
        .map_err(|_| response::Error::FailedToFetchOrders)?;

    let available = geo::within_radius(
        orders,
        origin,
        geo::clamp_radius(payload.params.radius_km),
        |order| Some(order.pickup_coordinates()),
    )
    .into_iter()
    .map(|(order, distance_km)| response::AvailableOrder {
        order,
        distance_km: geo::round_km(distance_km),
    })
    .collect();

    Ok(response::Success::Orders(available))
}
