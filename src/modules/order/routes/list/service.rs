use super::types::{request, response};
use crate::{
    modules::{
        driver,
        order::repository,
        user::repository::{self as user_repository, Role},
    },
    types::Context,
};
use std::sync::Arc;

async fn scope(
    ctx: Arc<Context>,
    payload: &request::Payload,
) -> Result<repository::Filters, response::Error> {
    let user = &payload.auth.user;
    let mut filters = repository::Filters {
        status: payload.filters.status,
        simple_status: payload.filters.simple_status,
        ..Default::default()
    };

    match user.role {
        Role::Customer => {
            let customer =
                user_repository::find_customer_by_user_id(&ctx.db_conn.pool, user.id.clone())
                    .await
                    .map_err(|_| response::Error::FailedToFetchOrders)?
                    .ok_or(response::Error::ProfileNotFound)?;
            filters.customer_id = Some(customer.id);
        }
        Role::RestaurantOwner => {
            let owner = user_repository::find_restaurant_owner_by_user_id(
                &ctx.db_conn.pool,
                user.id.clone(),
            )
            .await
            .map_err(|_| response::Error::FailedToFetchOrders)?
            .ok_or(response::Error::ProfileNotFound)?;
            filters.restaurant_owner_id = Some(owner.id);
            filters.restaurant_id = payload.filters.restaurant_id.clone();
        }
        Role::Driver => {
            let driver = driver::repository::find_by_user_id(&ctx.db_conn.pool, user.id.clone())
                .await
                .map_err(|_| response::Error::FailedToFetchOrders)?
                .ok_or(response::Error::ProfileNotFound)?;
            filters.driver_id = Some(driver.id);
        }
    }

    Ok(filters)
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let filters = scope(ctx.clone(), &payload).await?;

    repository::find_many(&ctx.db_conn.pool, payload.pagination, filters)
        .await
        .map_err(|_| response::Error::FailedToFetchOrders)
        .map(response::Success::Orders)
}
