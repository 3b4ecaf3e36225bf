use super::types::{request, response};
use crate::{
    modules::{
        driver::service as driver_service,
        order::repository::{self as order, OrderSimpleStatus},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let driver = driver_service::find_registered(ctx.clone(), &payload.auth.user).await?;

    order::find_many(
        &ctx.db_conn.pool,
        payload.pagination,
        order::Filters {
            driver_id: Some(driver.id),
            simple_status: Some(OrderSimpleStatus::Ongoing),
            ..Default::default()
        },
    )
    .await
    .map_err(|_| response::Error::FailedToFetchOrders)
    .map(response::Success::Orders)
}
