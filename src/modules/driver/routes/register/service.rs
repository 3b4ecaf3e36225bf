use super::types::{request, response};
use crate::{
    modules::driver::{repository, service as driver_service},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    match driver_service::find_registered(ctx.clone(), &payload.auth.user).await {
        Ok(_) => return Err(response::Error::AlreadyRegistered),
        Err(driver_service::Error::NotRegistered) => (),
        Err(err) => return Err(err.into()),
    }

    repository::create(
        &ctx.db_conn.pool,
        repository::CreateDriverPayload {
            vehicle_type: payload.body.vehicle_type,
            license_plate: payload.body.license_plate,
            user_id: payload.auth.user.id,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToRegisterDriver)
    .map(response::Success::DriverRegistered)
}
