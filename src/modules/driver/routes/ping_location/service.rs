use super::types::{request, response};
use crate::{
    modules::{
        driver::service as driver_service,
        location::repository::{self as location, Owner},
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

    let driver = driver_service::find_registered(ctx.clone(), &payload.auth.user).await?;

    location::upsert(
        &ctx.db_conn.pool,
        Owner::Driver(driver.id),
        Coordinates::new(payload.body.latitude, payload.body.longitude),
    )
    .await
    .map_err(|_| response::Error::FailedToSaveLocation)
    .map(response::Success::LocationSaved)
}
