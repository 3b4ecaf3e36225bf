use super::types::{request, response};
use crate::{
    modules::{
        order::{
            repository::{self, OrderStatus},
            service::{self as order_service, Actor},
        },
        payment,
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let (order, actor) =
        order_service::find_for_actor(ctx.clone(), &payload.auth.user, payload.id).await?;

    if actor != Actor::Customer {
        return Err(response::Error::NotOrderCustomer);
    }

    if !matches!(order.status, OrderStatus::Pending | OrderStatus::Cancelled) {
        return Err(response::Error::OrderInProgress);
    }

    if payment::repository::has_succeeded_for_order(&ctx.db_conn.pool, order.id.clone())
        .await
        .map_err(|_| response::Error::FailedToDeleteOrder)?
    {
        return Err(response::Error::OrderAlreadyPaid);
    }

    repository::delete_by_id(&ctx.db_conn.pool, order.id)
        .await
        .map_err(|_| response::Error::FailedToDeleteOrder)
        .map(|_| response::Success::OrderDeleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        modules::{payment::repository::PaymentStatus, user::repository::User},
        utils::fixtures,
    };
    use sqlx::PgPool;

    async fn delete(ctx: Arc<Context>, user: &User, id: String) -> response::Response {
        service(
            ctx,
            request::Payload {
                auth: fixtures::auth(user),
                id,
            },
        )
        .await
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn unpaid_pending_orders_are_deleted(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        fixtures::payment(&pool, &order).await;
        let ctx = fixtures::context(pool.clone());

        let result = delete(ctx, &marketplace.customer, order.id.clone()).await;

        assert!(matches!(result, Ok(response::Success::OrderDeleted)));
        let order = repository::find_by_id(&pool, order.id).await.expect("lookup should run");
        assert!(order.is_none());
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn orders_in_progress_are_kept(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        fixtures::advance(&pool, &order, OrderStatus::Confirmed).await;
        let ctx = fixtures::context(pool);

        let result = delete(ctx, &marketplace.customer, order.id).await;

        assert!(matches!(result, Err(response::Error::OrderInProgress)));
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn paid_orders_are_kept_even_when_cancelled(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        let payment = fixtures::payment(&pool, &order).await;
        payment::repository::settle(&pool, payment.payment_intent_id, PaymentStatus::Succeeded)
            .await
            .expect("payment should settle");
        fixtures::advance(&pool, &order, OrderStatus::Cancelled).await;
        let ctx = fixtures::context(pool);

        let result = delete(ctx, &marketplace.customer, order.id).await;

        assert!(matches!(result, Err(response::Error::OrderAlreadyPaid)));
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn only_the_customer_can_delete(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        let ctx = fixtures::context(pool);

        let result = delete(ctx, &marketplace.owner, order.id).await;

        assert!(matches!(result, Err(response::Error::NotOrderCustomer)));
    }
}
