use super::types::{request, response};
use crate::{
    modules::{
        driver,
        location::repository::{self as location, Owner},
        user::repository::{self, Role},
    },
    types::Context,
};
use serde_json::json;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = payload.auth.user;
    let pool = &ctx.db_conn.pool;

    let (profile, owner) = match user.role {
        Role::Customer => {
            let customer = repository::find_customer_by_user_id(pool, user.id.clone())
                .await
                .map_err(|_| response::Error::FailedToFetchProfile)?;
            let owner = customer.as_ref().map(|c| Owner::Customer(c.id.clone()));
            (customer.map(|c| json!(c)), owner)
        }
        Role::RestaurantOwner => {
            let owner = repository::find_restaurant_owner_by_user_id(pool, user.id.clone())
                .await
                .map_err(|_| response::Error::FailedToFetchProfile)?;
            (owner.map(|o| json!(o)), None)
        }
        Role::Driver => {
            let driver = driver::repository::find_by_user_id(pool, user.id.clone())
                .await
                .map_err(|_| response::Error::FailedToFetchProfile)?;
            let owner = driver.as_ref().map(|d| Owner::Driver(d.id.clone()));
            (driver.map(|d| json!(d)), owner)
        }
    };

    let location = match owner {
        Some(owner) => location::find_by_owner(pool, owner)
            .await
            .map_err(|_| response::Error::FailedToFetchProfile)?,
        None => None,
    };

    Ok(response::Success::Profile(response::Profile {
        user,
        profile,
        location,
    }))
}
