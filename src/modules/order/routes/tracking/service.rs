use super::types::{request, response};
use crate::{
    modules::{
        location::repository::{self as location, Owner},
        order::service as order_service,
    },
    types::Context,
    utils::geo,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let (order, _) =
        order_service::find_for_actor(ctx.clone(), &payload.auth.user, payload.id).await?;

    let driver_location = match order.driver_id.clone() {
        Some(driver_id) => location::find_by_owner(&ctx.db_conn.pool, Owner::Driver(driver_id))
            .await
            .map_err(|_| response::Error::FailedToTrackOrder)?,
        None => None,
    };

    let distance_km = match (&driver_location, order.delivery_coordinates()) {
        (Some(driver_location), Some(drop_off)) => Some(geo::round_km(
            driver_location.coordinates().distance_km(&drop_off),
        )),
        _ => None,
    };

    Ok(response::Success::Tracking(response::Tracking {
        order_id: order.id,
        status: order.status,
        driver_id: order.driver_id,
        driver_location,
        distance_km,
    }))
}
