pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
    }
}

pub mod response {
    use crate::modules::{order::service, payment::service::PaymentDetails};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        PaymentInitialized(PaymentDetails),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PaymentInitialized(details) => {
                    (StatusCode::OK, Json(json!(details))).into_response()
                }
            }
        }
    }

    pub enum Error {
        OrderNotFound,
        NotOrderCustomer,
        OrderNotPayable,
        FailedToInitializePayment,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::OrderNotFound | service::Error::OrderNotVisible => {
                    Self::OrderNotFound
                }
                service::Error::UnexpectedError => Self::FailedToInitializePayment,
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
                Self::OrderNotPayable => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Only pending orders can be paid for" })),
                )
                    .into_response(),
                Self::FailedToInitializePayment => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Failed to initialize payment" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
