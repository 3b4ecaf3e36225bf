pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
    }
}

pub mod response {
    use crate::modules::order::{repository::Order, service};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        PaymentConfirmed(Order),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PaymentConfirmed(order) => (
                    StatusCode::OK,
                    Json(json!({ "message": "Payment confirmed", "order": order })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        OrderNotFound,
        NotOrderCustomer,
        PaymentNotStarted,
        PaymentIncomplete(String),
        OrderCancelled,
        FailedToConfirmPayment,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::OrderNotFound | service::Error::OrderNotVisible => {
                    Self::OrderNotFound
                }
                service::Error::UnexpectedError => Self::FailedToConfirmPayment,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order not found" })),
                )
                    .into_response(),
                Self::NotOrderCustomer => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only the customer can pay for this order" })),
                )
                    .into_response(),
                Self::PaymentNotStarted => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "No payment has been started for this order" })),
                )
                    .into_response(),
                Self::PaymentIncomplete(status) => (
                    StatusCode::PAYMENT_REQUIRED,
                    Json(json!({ "error": "Payment has not succeeded", "status": status })),
                )
                    .into_response(),
                Self::OrderCancelled => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Order was cancelled before the payment went through" })),
                )
                    .into_response(),
                Self::FailedToConfirmPayment => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to confirm payment" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
