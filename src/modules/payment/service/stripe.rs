use bigdecimal::{BigDecimal, ToPrimitive};
use hmac::{Hmac, Mac};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::Sha256;
use std::{collections::HashMap, sync::Arc};

use crate::types::Context;

/// How far a webhook timestamp may drift from our clock, in seconds.
pub const SIGNATURE_TOLERANCE: i64 = 300;

#[derive(Debug)]
pub enum Error {
    RequestNotSent,
    InvalidHttpResponseStatusCode,
    FailedToDecodeResponse,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub client_secret: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl PaymentIntent {
    pub fn has_succeeded(&self) -> bool {
        self.status == "succeeded"
    }

    pub fn order_id(&self) -> Option<&str> {
        self.metadata.get("order_id").map(String::as_str)
    }
}

struct SendStripeRequestPayload {
    route: String,
    form: Option<Vec<(&'static str, String)>>,
    expected_status_code: StatusCode,
    method: Method,
}

async fn send_stripe_request<R: DeserializeOwned>(
    ctx: Arc<Context>,
    payload: SendStripeRequestPayload,
) -> Result<R, Error> {
    let url = format!("{}{}", ctx.payment.api_endpoint, payload.route);
    let client = reqwest::Client::new();
    let mut req = match payload.method {
        Method::GET => client.get(url),
        _ => client.post(url),
    }
    .bearer_auth(&ctx.payment.secret_key);

    if let Some(form) = payload.form {
        req = req.form(&form);
    }

    let res = req.send().await.map_err(|err| {
        tracing::error!("Failed to send Stripe request: {}", err);
        Error::RequestNotSent
    })?;

    let http_response_status_code = res.status();

    let data = res.text().await.map_err(|err| {
        tracing::error!("Failed to read Stripe response: {}", err);
        Error::FailedToDecodeResponse
    })?;

    if http_response_status_code != payload.expected_status_code {
        tracing::error!(
            "Got unexpected http response status from Stripe: {} {}",
            http_response_status_code,
            data
        );
        return Err(Error::InvalidHttpResponseStatusCode);
    }

    tracing::trace!("Response received from Stripe: {}", data);

    serde_json::from_str::<R>(&data).map_err(|err| {
        tracing::error!("Failed to decode Stripe response: {}", err);
        Error::FailedToDecodeResponse
    })
}

/// Stripe takes amounts in the currency's smallest unit.
pub fn to_minor_units(amount: &BigDecimal) -> Option<i64> {
    (amount * BigDecimal::from(100)).round(0).to_i64()
}

pub struct CreatePaymentIntentPayload {
    pub amount: i64,
    pub order_id: String,
}

pub async fn create_payment_intent(
    ctx: Arc<Context>,
    payload: CreatePaymentIntentPayload,
) -> Result<PaymentIntent, Error> {
    let currency = ctx.payment.currency.clone();

    send_stripe_request(
        ctx,
        SendStripeRequestPayload {
            route: String::from("/v1/payment_intents"),
            form: Some(vec![
                ("amount", payload.amount.to_string()),
                ("currency", currency),
                ("metadata[order_id]", payload.order_id),
                ("automatic_payment_methods[enabled]", String::from("true")),
            ]),
            expected_status_code: StatusCode::OK,
            method: Method::POST,
        },
    )
    .await
}

pub async fn retrieve_payment_intent(
    ctx: Arc<Context>,
    id: String,
) -> Result<PaymentIntent, Error> {
    send_stripe_request(
        ctx,
        SendStripeRequestPayload {
            route: format!("/v1/payment_intents/{}", id),
            form: None,
            expected_status_code: StatusCode::OK,
            method: Method::GET,
        },
    )
    .await
}

#[derive(Debug, PartialEq)]
pub enum SignatureError {
    MalformedHeader,
    TimestampOutOfTolerance,
    Mismatch,
}

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<Vec<u8>>,
}

fn parse_signature_header(header: &str) -> Result<SignatureHeader, SignatureError> {
    let mut timestamp = None;
    let mut signatures = vec![];

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| SignatureError::MalformedHeader)?,
                )
            }
            Some(("v1", value)) => {
                if let Ok(signature) = hex::decode(value) {
                    signatures.push(signature);
                }
            }
            _ => (),
        }
    }

    match (timestamp, signatures.is_empty()) {
        (Some(timestamp), false) => Ok(SignatureHeader {
            timestamp,
            signatures,
        }),
        _ => Err(SignatureError::MalformedHeader),
    }
}

/// Checks a `Stripe-Signature` header (`t=<unix>,v1=<hex>`) against the raw body.
pub fn verify_webhook_signature(
    secret: &str,
    header: &str,
    body: &[u8],
    now: i64,
) -> Result<(), SignatureError> {
    let header = parse_signature_header(header)?;

    if (now - header.timestamp).abs() > SIGNATURE_TOLERANCE {
        return Err(SignatureError::TimestampOutOfTolerance);
    }

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|err| {
        tracing::error!("Failed to generate mac: {:?}", err);
        SignatureError::Mismatch
    })?;
    mac.update(format!("{}.", header.timestamp).as_bytes());
    mac.update(body);

    header
        .signatures
        .iter()
        .any(|signature| mac.clone().verify_slice(signature).is_ok())
        .then_some(())
        .ok_or(SignatureError::Mismatch)
}

#[cfg(test)]
pub fn sign_webhook_payload(secret: &str, timestamp: i64, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}.", timestamp).as_bytes());
    mac.update(body);
    format!(
        "t={},v1={}",
        timestamp,
        hex::encode(mac.finalize().into_bytes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const SECRET: &str = "whsec_test";
    const BODY: &[u8] = br#"{"type":"payment_intent.succeeded"}"#;

    #[test]
    fn accepts_a_fresh_valid_signature() {
        let header = sign_webhook_payload(SECRET, 1_700_000_000, BODY);
        assert_eq!(
            verify_webhook_signature(SECRET, &header, BODY, 1_700_000_100),
            Ok(())
        );
    }

    #[test]
    fn accepts_any_matching_v1_signature() {
        let valid = sign_webhook_payload(SECRET, 1_700_000_000, BODY);
        let v1 = valid.split_once(",v1=").unwrap().1;
        let header = format!("t=1700000000,v1={},v1={}", "00".repeat(32), v1);
        assert_eq!(
            verify_webhook_signature(SECRET, &header, BODY, 1_700_000_000),
            Ok(())
        );
    }

    #[test]
    fn rejects_a_tampered_body() {
        let header = sign_webhook_payload(SECRET, 1_700_000_000, BODY);
        assert_eq!(
            verify_webhook_signature(SECRET, &header, b"{}", 1_700_000_000),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn rejects_another_secret() {
        let header = sign_webhook_payload("whsec_other", 1_700_000_000, BODY);
        assert_eq!(
            verify_webhook_signature(SECRET, &header, BODY, 1_700_000_000),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn rejects_stale_timestamps() {
        let header = sign_webhook_payload(SECRET, 1_700_000_000, BODY);
        assert_eq!(
            verify_webhook_signature(SECRET, &header, BODY, 1_700_000_000 + 301),
            Err(SignatureError::TimestampOutOfTolerance)
        );
    }

    #[test]
    fn rejects_malformed_headers() {
        assert_eq!(
            verify_webhook_signature(SECRET, "v1=abcd", BODY, 0),
            Err(SignatureError::MalformedHeader)
        );
        assert_eq!(
            verify_webhook_signature(SECRET, "t=1700000000", BODY, 1_700_000_000),
            Err(SignatureError::MalformedHeader)
        );
        assert_eq!(
            verify_webhook_signature(SECRET, "garbage", BODY, 0),
            Err(SignatureError::MalformedHeader)
        );
    }

    #[test]
    fn amounts_are_sent_in_cents() {
        assert_eq!(
            to_minor_units(&BigDecimal::from_str("23.75").unwrap()),
            Some(2375)
        );
        assert_eq!(to_minor_units(&BigDecimal::from(2)), Some(200));
    }

    #[test]
    fn payment_intents_expose_their_order() {
        let intent = serde_json::from_str::<PaymentIntent>(
            r#"{
                "id": "pi_123",
                "object": "payment_intent",
                "amount": 2375,
                "currency": "usd",
                "status": "succeeded",
                "client_secret": "pi_123_secret_abc",
                "metadata": { "order_id": "01HZY" }
            }"#,
        )
        .unwrap();

        assert!(intent.has_succeeded());
        assert_eq!(intent.order_id(), Some("01HZY"));
    }
}
