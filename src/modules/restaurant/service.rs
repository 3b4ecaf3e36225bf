use std::sync::Arc;

use super::repository::{self, Restaurant};
use crate::{
    modules::user::{self, repository::User},
    types::Context,
};

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
    NotRestaurantOwner,
    RestaurantNotFound,
    NotOwner,
}

pub async fn find_owner_id(ctx: Arc<Context>, user: &User) -> Result<String, Error> {
    if !user::repository::is_restaurant_owner(user) {
        return Err(Error::NotRestaurantOwner);
    }

    user::repository::find_restaurant_owner_by_user_id(&ctx.db_conn.pool, user.id.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?
        .map(|owner| owner.id)
        .ok_or(Error::NotRestaurantOwner)
}

/// Loads a restaurant and makes sure `user` owns it.
pub async fn find_owned(
    ctx: Arc<Context>,
    user: &User,
    restaurant_id: String,
) -> Result<Restaurant, Error> {
    let owner_id = find_owner_id(ctx.clone(), user).await?;

    let restaurant = repository::find_by_id(&ctx.db_conn.pool, restaurant_id)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::RestaurantNotFound)?;

    if !repository::is_owner(&restaurant, &owner_id) {
        return Err(Error::NotOwner);
    }

    Ok(restaurant)
}
