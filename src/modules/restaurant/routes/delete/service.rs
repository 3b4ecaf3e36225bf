use super::types::{request, response};
use crate::{
    modules::{
        media,
        restaurant::{repository, service as restaurant_service},
    },
    types::Context,
    utils::storage,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant =
        restaurant_service::find_owned(ctx.clone(), &payload.auth.user, payload.id).await?;

    let active_orders = repository::count_active_orders(&ctx.db_conn.pool, restaurant.id.clone())
        .await
        .map_err(|_| response::Error::FailedToDeleteRestaurant)?;

    if active_orders > 0 {
        return Err(response::Error::HasActiveOrders);
    }

    repository::delete_by_id(&ctx.db_conn.pool, restaurant.id.clone())
        .await
        .map_err(|_| response::Error::FailedToDeleteRestaurant)?;

    if let Some(cover_image) = restaurant.cover_image {
        let public_id = cover_image.0.public_id.clone();
        if media::repository::delete_by_public_id(&ctx.db_conn.pool, public_id)
            .await
            .is_err()
        {
            tracing::warn!("Failed to forget media of restaurant {}", restaurant.id);
        }
        if storage::delete_file(ctx.storage.clone(), cover_image.0).await.is_err() {
            tracing::warn!("Failed to remove cover image of restaurant {}", restaurant.id);
        }
    }

    Ok(response::Success::RestaurantDeleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{modules::order::repository::OrderStatus, utils::fixtures};
    use sqlx::PgPool;

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn restaurants_with_active_orders_are_kept(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        fixtures::advance(&pool, &order, OrderStatus::OutForDelivery).await;
        let ctx = fixtures::context(pool.clone());

        let result = service(
            ctx,
            request::Payload {
                auth: fixtures::auth(&marketplace.owner),
                id: marketplace.restaurant.id.clone(),
            },
        )
        .await;

        assert!(matches!(result, Err(response::Error::HasActiveOrders)));
        let restaurant = repository::find_by_id(&pool, marketplace.restaurant.id)
            .await
            .expect("lookup should run");
        assert!(restaurant.is_some());
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn restaurants_with_finished_orders_are_deleted(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let delivered = fixtures::order(&pool, &marketplace, 25).await;
        fixtures::advance(&pool, &delivered, OrderStatus::Delivered).await;
        let cancelled = fixtures::order(&pool, &marketplace, 25).await;
        fixtures::advance(&pool, &cancelled, OrderStatus::Cancelled).await;
        let ctx = fixtures::context(pool.clone());

        let result = service(
            ctx,
            request::Payload {
                auth: fixtures::auth(&marketplace.owner),
                id: marketplace.restaurant.id.clone(),
            },
        )
        .await;

        assert!(matches!(result, Ok(response::Success::RestaurantDeleted)));
        let restaurant = repository::find_by_id(&pool, marketplace.restaurant.id)
            .await
            .expect("lookup should run");
        assert!(restaurant.is_none());
    }
}
