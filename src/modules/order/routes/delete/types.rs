pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
    }
}

pub mod response {
    use crate::modules::order::service;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        OrderDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderDeleted => {
                    (StatusCode::OK, Json(json!({ "message": "Order deleted" }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        OrderNotFound,
        NotOrderCustomer,
        OrderInProgress,
        OrderAlreadyPaid,
        FailedToDeleteOrder,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::OrderNotFound | service::Error::OrderNotVisible => {
                    Self::OrderNotFound
                }
                service::Error::UnexpectedError => Self::FailedToDeleteOrder,
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
                    Json(json!({ "error": "Only the customer can delete this order" })),
                )
                    .into_response(),
                Self::OrderInProgress => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Only pending or cancelled orders can be deleted" })),
                )
                    .into_response(),
                Self::OrderAlreadyPaid => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Paid orders cannot be deleted" })),
                )
                    .into_response(),
                Self::FailedToDeleteOrder => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to delete order" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
