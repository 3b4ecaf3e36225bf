use super::types::{request, response};
use crate::{
    modules::driver::{repository, service as driver_service},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let driver = driver_service::find_registered(ctx.clone(), &payload.auth.user).await?;

    repository::set_availability(&ctx.db_conn.pool, driver.id, payload.body.is_available)
        .await
        .map_err(|_| response::Error::FailedToUpdateAvailability)
        .map(response::Success::AvailabilityUpdated)
}
