use std::sync::Arc;

use super::repository::{self, Category};
use crate::{
    modules::{restaurant::service as restaurant_service, user::repository::User},
    types::Context,
};

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
    NotRestaurantOwner,
    RestaurantNotFound,
    CategoryNotFound,
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

/// Loads a category whose restaurant belongs to `user`.
pub async fn find_owned(
    ctx: Arc<Context>,
    user: &User,
    category_id: String,
) -> Result<Category, Error> {
    let category = repository::find_by_id(&ctx.db_conn.pool, category_id)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::CategoryNotFound)?;

    restaurant_service::find_owned(ctx, user, category.restaurant_id.clone()).await?;

    Ok(category)
}
