use super::types::{request, response};
use crate::{
    modules::{
        location::repository::{self as location, Owner},
        user::repository,
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

    if !repository::is_customer(&payload.auth.user) {
        return Err(response::Error::NotCustomer);
    }

    let customer = repository::find_customer_by_user_id(&ctx.db_conn.pool, payload.auth.user.id)
        .await
        .map_err(|_| response::Error::FailedToUpdateLocation)?
        .ok_or(response::Error::NotCustomer)?;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToUpdateLocation
    })?;

    let customer =
        repository::update_customer_address(&mut *tx, customer.id, payload.body.address)
            .await
            .map_err(|_| response::Error::FailedToUpdateLocation)?;

    let location = location::upsert(
        &mut *tx,
        Owner::Customer(customer.id.clone()),
        Coordinates::new(payload.body.latitude, payload.body.longitude),
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateLocation)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToUpdateLocation
    })?;

    Ok(response::Success::LocationUpdated(customer, location))
}
