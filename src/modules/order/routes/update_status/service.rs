use super::types::{request, response};
use crate::{
    modules::order::{repository, service as order_service},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let (order, actor) =
        order_service::find_for_actor(ctx.clone(), &payload.auth.user, payload.id).await?;

    let to = payload.body.status;
    if !order_service::can_transition(actor, order.status, to) {
        tracing::warn!(
            "{:?} tried to move order {} from {} to {}",
            actor,
            order.id,
            order.status.as_str(),
            to.as_str()
        );
        return Err(response::Error::TransitionNotAllowed(order.status, to));
    }

    repository::update_status(&ctx.db_conn.pool, order.id, order.status, to)
        .await
        .map_err(|_| response::Error::FailedToUpdateStatus)?
        .ok_or(response::Error::StatusChanged)
        .map(response::Success::StatusUpdated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{modules::order::repository::OrderStatus, utils::fixtures};
    use sqlx::PgPool;

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn a_cancelled_order_cannot_be_cancelled_again(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        let ctx = fixtures::context(pool);
        let cancel = |id: String| request::Payload {
            auth: fixtures::auth(&marketplace.customer),
            id,
            body: request::Body {
                status: OrderStatus::Cancelled,
            },
        };

        let first = service(ctx.clone(), cancel(order.id.clone())).await;
        let second = service(ctx, cancel(order.id)).await;

        assert!(matches!(
            first,
            Ok(response::Success::StatusUpdated(ref cancelled))
                if cancelled.status == OrderStatus::Cancelled
        ));
        assert!(matches!(
            second,
            Err(response::Error::TransitionNotAllowed(
                OrderStatus::Cancelled,
                OrderStatus::Cancelled
            ))
        ));
    }
}
