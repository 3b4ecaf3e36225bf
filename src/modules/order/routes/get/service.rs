use super::types::{request, response};
use crate::{
    modules::{
        order::{repository, service as order_service},
        payment, restaurant,
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let (order, _) =
        order_service::find_for_actor(ctx.clone(), &payload.auth.user, payload.id).await?;

    let items = repository::find_items_by_order_id(&ctx.db_conn.pool, order.id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchOrder)?;

    let payment =
        payment::repository::find_latest_by_order_id(&ctx.db_conn.pool, order.id.clone())
            .await
            .map_err(|_| response::Error::FailedToFetchOrder)?;

    let restaurant_name =
        restaurant::repository::find_by_id(&ctx.db_conn.pool, order.restaurant_id.clone())
            .await
            .map_err(|_| response::Error::FailedToFetchOrder)?
            .map(|restaurant| restaurant.name);

    Ok(response::Success::Order(response::OrderDetails {
        order,
        items,
        payment,
        restaurant_name,
    }))
}
