use super::types::{request, response};
use crate::{
    modules::{
        order::service::{self as order_service, Actor},
        payment::service::{self as payment_service, stripe, Reconciliation},
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

    let payment_intent_id = order
        .payment_intent_id
        .clone()
        .ok_or(response::Error::PaymentNotStarted)?;

    let intent = stripe::retrieve_payment_intent(ctx.clone(), payment_intent_id)
        .await
        .map_err(|_| response::Error::FailedToConfirmPayment)?;

    let reconciliation = payment_service::reconcile_payment_intent(ctx, intent).await;
    respond(&order.id, reconciliation)
}

fn respond(
    order_id: &str,
    reconciliation: Result<Reconciliation, payment_service::Error>,
) -> response::Response {
    match reconciliation {
        Ok(Reconciliation::Confirmed(order)) | Ok(Reconciliation::AlreadyConfirmed(order)) => {
            Ok(response::Success::PaymentConfirmed(order))
        }
        Ok(Reconciliation::OrderCancelled(_)) => Err(response::Error::OrderCancelled),
        Ok(Reconciliation::NotSucceeded(status)) => {
            tracing::debug!("Payment for order {} is still {}", order_id, status);
            Err(response::Error::PaymentIncomplete(status))
        }
        Err(_) => Err(response::Error::FailedToConfirmPayment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::order::repository::{Order, OrderStatus};
    use axum::{http::StatusCode, response::IntoResponse};
    use bigdecimal::BigDecimal;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: String::from("01HORDER"),
            status,
            sub_total: BigDecimal::from(23),
            delivery_fee: BigDecimal::from(2),
            total: BigDecimal::from(25),
            delivery_address: String::from("12 Marina Road, Lagos"),
            delivery_latitude: None,
            delivery_longitude: None,
            payment_intent_id: Some(String::from("pi_123")),
            customer_id: String::from("01HCUSTOMER"),
            restaurant_id: String::from("01HRESTAURANT"),
            driver_id: None,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: None,
        }
    }

    #[test]
    fn payments_for_cancelled_orders_are_conflicts() {
        let cancelled = Reconciliation::OrderCancelled(order(OrderStatus::Cancelled));

        match respond("01HORDER", Ok(cancelled)) {
            Err(error) => assert_eq!(error.into_response().status(), StatusCode::CONFLICT),
            Ok(_) => panic!("a cancelled order must not be reported as paid"),
        }
    }

    #[test]
    fn repeated_confirmations_still_succeed() {
        let confirmed = Reconciliation::AlreadyConfirmed(order(OrderStatus::Confirmed));

        assert!(matches!(
            respond("01HORDER", Ok(confirmed)),
            Ok(response::Success::PaymentConfirmed(_))
        ));
    }

    #[test]
    fn unfinished_payments_are_reported() {
        let pending = Reconciliation::NotSucceeded(String::from("processing"));

        assert!(matches!(
            respond("01HORDER", Ok(pending)),
            Err(response::Error::PaymentIncomplete(ref status)) if status == "processing"
        ));
    }
}
