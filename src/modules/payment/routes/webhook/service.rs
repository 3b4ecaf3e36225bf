use super::types::{request, response, Event};
use crate::{
    modules::payment::service::{self, stripe},
    types::Context,
};
use std::sync::Arc;

fn parse_payment_intent(event: Event) -> Result<stripe::PaymentIntent, response::Error> {
    serde_json::from_value::<stripe::PaymentIntent>(event.data.object).map_err(|err| {
        tracing::error!("Event {} does not carry a payment intent: {}", event.id, err);
        response::Error::InvalidPayload
    })
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    stripe::verify_webhook_signature(
        &ctx.payment.webhook_secret,
        &payload.signature.0,
        payload.body.as_ref(),
        chrono::Utc::now().timestamp(),
    )
    .map_err(|err| {
        tracing::warn!("Rejected webhook with bad signature: {:?}", err);
        response::Error::InvalidSignature
    })?;

    let event = serde_json::from_slice::<Event>(payload.body.as_ref()).map_err(|err| {
        tracing::error!("Failed to parse webhook body: {}", err);
        response::Error::InvalidPayload
    })?;

    tracing::debug!("Received Stripe event {} ({})", event.id, event.kind);

    match event.kind.as_str() {
        "payment_intent.succeeded" => {
            let intent = parse_payment_intent(event)?;
            service::reconcile_payment_intent(ctx, intent)
                .await
                .map_err(|err| match err {
                    service::Error::PaymentNotFound
                    | service::Error::AmountMismatch
                    | service::Error::OrderMismatch => {
                        response::Error::InvalidPayload
                    }
                    _ => response::Error::ServerError,
                })
                .map(|_| response::Success::Handled)
        }
        "payment_intent.payment_failed" => {
            let intent = parse_payment_intent(event)?;
            service::mark_payment_failed(ctx, intent.id)
                .await
                .map_err(|_| response::Error::ServerError)
                .map(|_| response::Success::Handled)
        }
        _ => Ok(response::Success::Ignored),
    }
}
