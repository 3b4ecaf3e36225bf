use super::types::{request, response};
use crate::{
    modules::{category, frontend::pages, menu_item, restaurant},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant = restaurant::repository::find_with_location_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToRenderPage)?
        .ok_or(response::Error::RestaurantNotFound)?;

    let categories = category::repository::find_many_by_restaurant_id(
        &ctx.db_conn.pool,
        restaurant.restaurant.id.clone(),
    )
    .await
    .map_err(|_| response::Error::FailedToRenderPage)?;

    let menu_items = menu_item::repository::find_all_by_restaurant_id(
        &ctx.db_conn.pool,
        restaurant.restaurant.id.clone(),
    )
    .await
    .map_err(|_| response::Error::FailedToRenderPage)?;

    Ok(response::Success::Page(pages::restaurant(
        &restaurant,
        &categories,
        &menu_items,
        &ctx.payment.publishable_key,
    )))
}
