use super::types::{request, response};
use crate::{
    modules::{
        menu_item,
        order::{repository, service as order_service},
        restaurant, user,
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

    let customer =
        user::repository::find_customer_by_user_id(&ctx.db_conn.pool, payload.auth.user.id.clone())
            .await
            .map_err(|_| response::Error::FailedToCreateOrder)?
            .ok_or(response::Error::NotCustomer)?;

    let body = payload.body;

    let restaurant =
        restaurant::repository::find_with_location_by_id(&ctx.db_conn.pool, body.restaurant_id)
            .await
            .map_err(|_| response::Error::FailedToCreateOrder)?
            .ok_or(response::Error::RestaurantNotFound)?;

    if !restaurant.restaurant.is_open {
        return Err(response::Error::RestaurantClosed);
    }

    let requested = body
        .items
        .into_iter()
        .map(|item| (item.menu_item_id, item.quantity))
        .collect::<Vec<_>>();

    let menu_items = menu_item::repository::find_many_by_ids(
        &ctx.db_conn.pool,
        requested.iter().map(|(id, _)| id.clone()).collect(),
    )
    .await
    .map_err(|_| response::Error::FailedToCreateOrder)?;

    let lines = order_service::resolve_lines(requested, menu_items, &restaurant.restaurant.id)
        .map_err(response::Error::InvalidItems)?;

    let drop_off = match (body.delivery_latitude, body.delivery_longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
        _ => None,
    };

    let sub_total = order_service::calculate_sub_total(
        lines
            .iter()
            .map(|(menu_item, quantity)| (&menu_item.price, *quantity)),
    );
    let delivery_fee =
        order_service::calculate_delivery_fee(&ctx.delivery, restaurant.coordinates(), drop_off);
    let total = &sub_total + &delivery_fee;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToCreateOrder
    })?;

    let order = repository::create(
        &mut *tx,
        repository::CreateOrderPayload {
            sub_total,
            delivery_fee,
            total,
            delivery_address: body.delivery_address,
            delivery_coordinates: drop_off,
            customer_id: customer.id,
            restaurant_id: restaurant.restaurant.id,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateOrder)?;

    repository::create_items(
        &mut *tx,
        order.id.clone(),
        lines
            .into_iter()
            .map(|(menu_item, quantity)| repository::CreateOrderItemPayload {
                quantity,
                price: menu_item.price,
                menu_item_id: menu_item.id,
            })
            .collect(),
    )
    .await
    .map_err(|_| response::Error::FailedToCreateOrder)?;

    let items = repository::find_items_by_order_id(&mut *tx, order.id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateOrder)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToCreateOrder
    })?;

    tracing::info!("Order {} placed for {}", order.id, order.total);

    Ok(response::Success::OrderCreated(order, items))
}
