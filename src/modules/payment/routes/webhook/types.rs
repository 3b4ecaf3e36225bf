use serde::Deserialize;

#[derive(Deserialize)]
pub struct EventData {
    pub object: serde_json::Value,
}

#[derive(Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: EventData,
}

pub mod request {
    use axum::http::header::{HeaderName, HeaderValue};
    use bytes::Bytes;
    use headers::{Error, Header};
    use std::iter;

    pub static STRIPE_SIGNATURE: HeaderName = HeaderName::from_static("stripe-signature");

    #[derive(Clone, Debug)]
    pub struct StripeSignature(pub String);

    impl Header for StripeSignature {
        fn name() -> &'static HeaderName {
            &STRIPE_SIGNATURE
        }

        fn decode<'i, I>(values: &mut I) -> Result<Self, Error>
        where
            Self: Sized,
            I: Iterator<Item = &'i HeaderValue>,
        {
            values
                .next()
                .and_then(|value| value.to_str().ok())
                .map(|value| Self(value.to_string()))
                .ok_or(Error::invalid())
        }

        fn encode<E>(&self, values: &mut E)
        where
            E: Extend<HeaderValue>,
        {
            if let Ok(value) = HeaderValue::from_str(&self.0) {
                values.extend(iter::once(value))
            }
        }
    }

    pub type Headers = StripeSignature;

    pub struct Payload {
        pub signature: Headers,
        pub body: Bytes,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Handled,
        Ignored,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Handled => {
                    (StatusCode::OK, Json(json!({ "message": "Event handled" }))).into_response()
                }
                Self::Ignored => {
                    (StatusCode::OK, Json(json!({ "message": "Event ignored" }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        InvalidSignature,
        InvalidPayload,
        ServerError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidSignature => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid signature" })),
                )
                    .into_response(),
                Self::InvalidPayload => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid payload" })),
                )
                    .into_response(),
                Self::ServerError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to handle event" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
