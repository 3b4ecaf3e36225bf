use super::types::{request, response};
use crate::{
    modules::{
        order::service::{self as order_service, Actor},
        payment::service as payment_service,
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

    payment_service::initialize_payment_for_order(ctx, order)
        .await
        .map_err(|err| match err {
            payment_service::Error::OrderNotPayable => response::Error::OrderNotPayable,
            _ => response::Error::FailedToInitializePayment,
        })
        .map(response::Success::PaymentInitialized)
}
