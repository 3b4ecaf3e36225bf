pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
    }
}

pub mod response {
    use crate::modules::order::repository::Order;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        DriverAssigned(Order),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DriverAssigned(order) => (StatusCode::OK, Json(json!(order))).into_response(),
            }
        }
    }

    pub enum Error {
        NotRegisteredDriver,
        DriverUnavailable,
        OrderNotFound,
        OrderNotAvailable,
        FailedToAssignDriver,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::NotRegisteredDriver => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Register as a driver to accept orders" })),
                )
                    .into_response(),
                Self::DriverUnavailable => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Set yourself as available to accept orders" })),
                )
                    .into_response(),
                Self::OrderNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order not found" })),
                )
                    .into_response(),
                Self::OrderNotAvailable => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Order is no longer available for pickup" })),
                )
                    .into_response(),
                Self::FailedToAssignDriver => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to assign driver" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
