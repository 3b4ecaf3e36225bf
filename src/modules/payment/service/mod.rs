pub mod stripe;

use bigdecimal::BigDecimal;
use serde::Serialize;
use std::sync::Arc;

use super::repository::{self, PaymentStatus};
use crate::{
    modules::order::{
        self,
        repository::{Order, OrderStatus},
    },
    types::Context,
};

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
    OrderNotPayable,
    PaymentNotFound,
    AmountMismatch,
    OrderMismatch,
}

#[derive(Serialize, Debug)]
pub struct PaymentDetails {
    pub payment_intent_id: String,
    pub client_secret: Option<String>,
    pub amount: BigDecimal,
    pub currency: String,
    pub publishable_key: String,
}

fn details(ctx: &Context, order: &Order, intent: stripe::PaymentIntent) -> PaymentDetails {
    PaymentDetails {
        payment_intent_id: intent.id,
        client_secret: intent.client_secret,
        amount: order.total.clone(),
        currency: intent.currency,
        publishable_key: ctx.payment.publishable_key.clone(),
    }
}

async fn reusable_intent(
    ctx: Arc<Context>,
    order: &Order,
) -> Result<Option<stripe::PaymentIntent>, Error> {
    let payment = repository::find_latest_by_order_id(&ctx.db_conn.pool, order.id.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?;

    let payment = match payment {
        Some(payment) if payment.status == PaymentStatus::Pending => payment,
        _ => return Ok(None),
    };

    let intent = stripe::retrieve_payment_intent(ctx, payment.payment_intent_id)
        .await
        .map_err(|_| Error::UnexpectedError)?;

    Ok(match intent.status.as_str() {
        "canceled" | "succeeded" => None,
        _ => Some(intent),
    })
}

/// Creates a payment intent for a pending order, or hands back the one already open.
pub async fn initialize_payment_for_order(
    ctx: Arc<Context>,
    order: Order,
) -> Result<PaymentDetails, Error> {
    if order.status != OrderStatus::Pending {
        return Err(Error::OrderNotPayable);
    }

    if let Some(intent) = reusable_intent(ctx.clone(), &order).await? {
        tracing::debug!("Reusing payment intent {} for order {}", intent.id, order.id);
        return Ok(details(&ctx, &order, intent));
    }

    let amount = stripe::to_minor_units(&order.total).ok_or_else(|| {
        tracing::error!("Order {} total does not fit in minor units", order.id);
        Error::UnexpectedError
    })?;

    let intent = stripe::create_payment_intent(
        ctx.clone(),
        stripe::CreatePaymentIntentPayload {
            amount,
            order_id: order.id.clone(),
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        Error::UnexpectedError
    })?;

    repository::create(
        &mut *tx,
        repository::CreatePaymentPayload {
            payment_intent_id: intent.id.clone(),
            amount: order.total.clone(),
            currency: intent.currency.clone(),
            order_id: order.id.clone(),
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    order::repository::set_payment_intent_id(&mut *tx, order.id.clone(), intent.id.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        Error::UnexpectedError
    })?;

    tracing::info!("Created payment intent {} for order {}", intent.id, order.id);

    Ok(details(&ctx, &order, intent))
}

pub enum Reconciliation {
    Confirmed(Order),
    AlreadyConfirmed(Order),
    /// The money was taken but the order had been cancelled in the meantime.
    OrderCancelled(Order),
    NotSucceeded(String),
}

#[derive(Debug, PartialEq, Eq)]
enum OrderStep {
    Confirm,
    AlreadyConfirmed,
    Cancelled,
}

fn order_step(status: OrderStatus) -> OrderStep {
    match status {
        OrderStatus::Pending => OrderStep::Confirm,
        OrderStatus::Cancelled => OrderStep::Cancelled,
        _ => OrderStep::AlreadyConfirmed,
    }
}

/// Applies a Stripe payment intent to our records. Safe to call more than once for the
/// same intent.
pub async fn reconcile_payment_intent(
    ctx: Arc<Context>,
    intent: stripe::PaymentIntent,
) -> Result<Reconciliation, Error> {
    if !intent.has_succeeded() {
        return Ok(Reconciliation::NotSucceeded(intent.status));
    }

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        Error::UnexpectedError
    })?;

    let payment = repository::lock_by_payment_intent_id(&mut *tx, intent.id.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or_else(|| {
            tracing::error!("No payment recorded for intent {}", intent.id);
            Error::PaymentNotFound
        })?;

    if intent.order_id().is_some_and(|order_id| order_id != payment.order_id) {
        tracing::error!(
            "Payment intent {} belongs to another order than payment {}",
            intent.id,
            payment.id
        );
        return Err(Error::OrderMismatch);
    }

    let order = order::repository::lock_by_id(&mut *tx, payment.order_id.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or_else(|| {
            tracing::error!("Order not found for payment {}", payment.id);
            Error::UnexpectedError
        })?;

    if stripe::to_minor_units(&order.total).map_or(true, |total| intent.amount < total) {
        tracing::error!(
            "Payment intent {} amount is less than order {} total",
            intent.id,
            order.id
        );
        return Err(Error::AmountMismatch);
    }

    if payment.status != PaymentStatus::Succeeded {
        repository::settle(&mut *tx, intent.id.clone(), PaymentStatus::Succeeded)
            .await
            .map_err(|_| Error::UnexpectedError)?
            .ok_or_else(|| {
                tracing::error!(
                    "Payment {} could not move from {} to {}",
                    payment.id,
                    payment.status,
                    PaymentStatus::Succeeded
                );
                Error::UnexpectedError
            })?;
    }

    let reconciliation = match order_step(order.status) {
        OrderStep::Confirm => order::repository::confirm_payment(&mut *tx, order.id.clone())
            .await
            .map_err(|_| Error::UnexpectedError)?
            .map(Reconciliation::Confirmed)
            .ok_or_else(|| {
                tracing::error!("Order {} changed while it was locked", order.id);
                Error::UnexpectedError
            })?,
        OrderStep::AlreadyConfirmed => Reconciliation::AlreadyConfirmed(order),
        OrderStep::Cancelled => Reconciliation::OrderCancelled(order),
    };

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        Error::UnexpectedError
    })?;

    match &reconciliation {
        Reconciliation::Confirmed(order) => {
            tracing::info!("Payment confirmed for order {}", order.id)
        }
        Reconciliation::OrderCancelled(order) => tracing::error!(
            "Payment {} succeeded for cancelled order {}, it needs a refund",
            payment.id,
            order.id
        ),
        _ => (),
    }

    Ok(reconciliation)
}

pub async fn mark_payment_failed(
    ctx: Arc<Context>,
    payment_intent_id: String,
) -> Result<(), Error> {
    let payment = repository::settle(
        &ctx.db_conn.pool,
        payment_intent_id.clone(),
        PaymentStatus::Failed,
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    if payment.is_none() {
        tracing::debug!(
            "Ignoring failure for intent {}, payment already settled or unknown",
            payment_intent_id
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixtures;
    use sqlx::PgPool;
    use std::collections::HashMap;

    fn intent(payment: &repository::Payment, amount: i64, status: &str) -> stripe::PaymentIntent {
        stripe::PaymentIntent {
            id: payment.payment_intent_id.clone(),
            amount,
            currency: payment.currency.clone(),
            status: status.to_string(),
            client_secret: None,
            metadata: HashMap::from([("order_id".to_string(), payment.order_id.clone())]),
        }
    }

    async fn payment_status(pool: &PgPool, order: &Order) -> PaymentStatus {
        repository::find_latest_by_order_id(pool, order.id.clone())
            .await
            .expect("payment lookup should succeed")
            .expect("payment should exist")
            .status
    }

    #[test]
    fn only_pending_orders_get_confirmed() {
        assert_eq!(order_step(OrderStatus::Pending), OrderStep::Confirm);
        assert_eq!(order_step(OrderStatus::Cancelled), OrderStep::Cancelled);
        assert_eq!(order_step(OrderStatus::Confirmed), OrderStep::AlreadyConfirmed);
        assert_eq!(order_step(OrderStatus::Delivered), OrderStep::AlreadyConfirmed);
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn redelivered_intents_confirm_once(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        let payment = fixtures::payment(&pool, &order).await;
        let ctx = fixtures::context(pool.clone());

        let first = reconcile_payment_intent(ctx.clone(), intent(&payment, 2500, "succeeded"))
            .await
            .expect("first delivery should reconcile");
        let second = reconcile_payment_intent(ctx, intent(&payment, 2500, "succeeded"))
            .await
            .expect("second delivery should reconcile");

        assert!(matches!(
            first,
            Reconciliation::Confirmed(ref order) if order.status == OrderStatus::Confirmed
        ));
        assert!(matches!(second, Reconciliation::AlreadyConfirmed(_)));
        assert_eq!(payment_status(&pool, &order).await, PaymentStatus::Succeeded);
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn failed_intents_can_succeed_on_retry(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        let payment = fixtures::payment(&pool, &order).await;
        let ctx = fixtures::context(pool.clone());

        mark_payment_failed(ctx.clone(), payment.payment_intent_id.clone())
            .await
            .expect("failure should be recorded");
        assert_eq!(payment_status(&pool, &order).await, PaymentStatus::Failed);

        let reconciliation = reconcile_payment_intent(ctx, intent(&payment, 2500, "succeeded"))
            .await
            .expect("retry should reconcile");

        assert!(matches!(reconciliation, Reconciliation::Confirmed(_)));
        assert_eq!(payment_status(&pool, &order).await, PaymentStatus::Succeeded);
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn short_payments_leave_the_order_pending(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        let payment = fixtures::payment(&pool, &order).await;
        let ctx = fixtures::context(pool.clone());

        let result = reconcile_payment_intent(ctx, intent(&payment, 2499, "succeeded")).await;

        assert!(matches!(result, Err(Error::AmountMismatch)));
        assert_eq!(payment_status(&pool, &order).await, PaymentStatus::Pending);

        let order = order::repository::find_by_id(&pool, order.id.clone())
            .await
            .expect("order lookup should succeed")
            .expect("order should exist");
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn intents_for_another_order_are_refused(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        let payment = fixtures::payment(&pool, &order).await;
        let ctx = fixtures::context(pool.clone());

        let mut intent = intent(&payment, 2500, "succeeded");
        intent
            .metadata
            .insert("order_id".to_string(), "01HSOMEOTHERORDER".to_string());

        let result = reconcile_payment_intent(ctx, intent).await;

        assert!(matches!(result, Err(Error::OrderMismatch)));
        assert_eq!(payment_status(&pool, &order).await, PaymentStatus::Pending);
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn payments_for_cancelled_orders_are_flagged(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        let payment = fixtures::payment(&pool, &order).await;
        fixtures::advance(&pool, &order, OrderStatus::Cancelled).await;
        let ctx = fixtures::context(pool.clone());

        let reconciliation = reconcile_payment_intent(ctx, intent(&payment, 2500, "succeeded"))
            .await
            .expect("cancelled order should reconcile");

        assert!(matches!(
            reconciliation,
            Reconciliation::OrderCancelled(ref order) if order.status == OrderStatus::Cancelled
        ));
        assert_eq!(payment_status(&pool, &order).await, PaymentStatus::Succeeded);
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn unfinished_intents_change_nothing(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        let payment = fixtures::payment(&pool, &order).await;
        let ctx = fixtures::context(pool.clone());

        let reconciliation = reconcile_payment_intent(ctx, intent(&payment, 2500, "processing"))
            .await
            .expect("unfinished intent should be reported");

        assert!(matches!(
            reconciliation,
            Reconciliation::NotSucceeded(ref status) if status == "processing"
        ));
        assert_eq!(payment_status(&pool, &order).await, PaymentStatus::Pending);
    }
}
