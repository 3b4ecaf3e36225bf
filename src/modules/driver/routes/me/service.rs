use super::types::{request, response};
use crate::{
    modules::{
        driver::service as driver_service,
        location::repository::{self as location, Owner},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let driver = driver_service::find_registered(ctx.clone(), &payload.auth.user).await?;

    let location = location::find_by_owner(&ctx.db_conn.pool, Owner::Driver(driver.id.clone()))
        .await
        .map_err(|_| response::Error::FailedToFetchDriver)?;

    Ok(response::Success::Driver(driver, location))
}
