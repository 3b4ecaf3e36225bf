use super::types::{request, response};
use crate::{
    modules::{driver, order::repository, user},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    if !user::repository::is_driver(&payload.auth.user) {
        return Err(response::Error::NotRegisteredDriver);
    }

    let driver =
        driver::repository::find_by_user_id(&ctx.db_conn.pool, payload.auth.user.id.clone())
            .await
            .map_err(|_| response::Error::FailedToAssignDriver)?
            .ok_or(response::Error::NotRegisteredDriver)?;

    if !driver.is_available {
        return Err(response::Error::DriverUnavailable);
    }

    let order = repository::find_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToAssignDriver)?
        .ok_or(response::Error::OrderNotFound)?;

    let order = repository::assign_driver(&ctx.db_conn.pool, order.id, driver.id.clone())
        .await
        .map_err(|_| response::Error::FailedToAssignDriver)?
        .ok_or(response::Error::OrderNotAvailable)?;

    tracing::info!("Driver {} accepted order {}", driver.id, order.id);

    Ok(response::Success::DriverAssigned(order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{modules::order::repository::OrderStatus, utils::fixtures};
    use sqlx::PgPool;

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn a_taken_order_is_refused_to_the_next_driver(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        fixtures::advance(&pool, &order, OrderStatus::Confirmed).await;
        let (first, _) = fixtures::driver(&pool).await;
        let (second, _) = fixtures::driver(&pool).await;
        let ctx = fixtures::context(pool);

        let accepted = service(
            ctx.clone(),
            request::Payload {
                auth: fixtures::auth(&first),
                id: order.id.clone(),
            },
        )
        .await;
        let refused = service(
            ctx,
            request::Payload {
                auth: fixtures::auth(&second),
                id: order.id,
            },
        )
        .await;

        assert!(matches!(accepted, Ok(response::Success::DriverAssigned(_))));
        assert!(matches!(refused, Err(response::Error::OrderNotAvailable)));
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn offline_drivers_cannot_accept_orders(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        fixtures::advance(&pool, &order, OrderStatus::Confirmed).await;
        let (user, driver) = fixtures::driver(&pool).await;
        driver::repository::set_availability(&pool, driver.id, false)
            .await
            .expect("driver should go offline");
        let ctx = fixtures::context(pool);

        let result = service(
            ctx,
            request::Payload {
                auth: fixtures::auth(&user),
                id: order.id,
            },
        )
        .await;

        assert!(matches!(result, Err(response::Error::DriverUnavailable)));
    }
}
