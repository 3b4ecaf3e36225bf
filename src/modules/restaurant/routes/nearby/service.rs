use super::types::{request, response};
use crate::{
    modules::restaurant::repository,
    types::Context,
    utils::geo::{self, Coordinates},
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, params: request::Params) -> response::Response {
    params.validate().map_err(|errors| {
        tracing::warn!("Failed to validate params: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurants = repository::find_open_with_location(&ctx.db_conn.pool)
        .await
        .map_err(|_| response::Error::FailedToFetchRestaurants)?;

    let nearby = geo::within_radius(
        restaurants,
        Coordinates::new(params.latitude, params.longitude),
        geo::clamp_radius(params.radius_km),
        |restaurant| restaurant.coordinates(),
    )
    .into_iter()
    .map(|(restaurant, distance_km)| response::NearbyRestaurant {
        restaurant,
        distance_km: geo::round_km(distance_km),
    })
    .collect();

    Ok(response::Success::Restaurants(nearby))
}
