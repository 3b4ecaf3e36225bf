use std::sync::Arc;

use super::repository::{self, MenuItem};
use crate::{
    modules::{
        category::repository as category_repository, restaurant::service as restaurant_service,
        user::repository::User,
    },
    types::Context,
};

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
    MenuItemNotFound,
    RestaurantNotFound,
    NotRestaurantOwner,
    CategoryNotInRestaurant,
}

impl From<restaurant_service::Error> for Error {
    fn from(err: restaurant_service::Error) -> Self {
        match err {
            restaurant_service::Error::UnexpectedError => Error::UnexpectedError,
            restaurant_service::Error::RestaurantNotFound => Error::RestaurantNotFound,
            restaurant_service::Error::NotRestaurantOwner | restaurant_service::Error::NotOwner => {
                Error::NotRestaurantOwner
            }
        }
    }
}

/// Loads a menu item whose restaurant belongs to `user`.
pub async fn find_owned(
    ctx: Arc<Context>,
    user: &User,
    menu_item_id: String,
) -> Result<MenuItem, Error> {
    let menu_item = repository::find_by_id(&ctx.db_conn.pool, menu_item_id)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::MenuItemNotFound)?;

    restaurant_service::find_owned(ctx, user, menu_item.restaurant_id.clone()).await?;

    Ok(menu_item)
}

pub async fn ensure_category_belongs_to(
    ctx: Arc<Context>,
    category_id: String,
    restaurant_id: &str,
) -> Result<(), Error> {
    let category = category_repository::find_by_id(&ctx.db_conn.pool, category_id)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::CategoryNotInRestaurant)?;

    if category.restaurant_id != restaurant_id {
        return Err(Error::CategoryNotInRestaurant);
    }

    Ok(())
}
