pub mod request {
    use crate::{modules::auth::middleware::Auth, utils::pagination::Pagination};

    pub struct Payload {
        pub auth: Auth,
        pub pagination: Pagination,
    }
}

pub mod response {
    use crate::{
        modules::{driver::service, order::repository::Order},
        utils::pagination::Paginated,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Orders(Paginated<Order>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Orders(page) => (StatusCode::OK, Json(json!(page))).into_response(),
            }
        }
    }

    pub enum Error {
        NotDriver,
        NotRegistered,
        FailedToFetchOrders,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::NotDriver => Self::NotDriver,
                service::Error::NotRegistered => Self::NotRegistered,
                service::Error::UnexpectedError => Self::FailedToFetchOrders,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::NotDriver => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only drivers can access this resource" })),
                )
                    .into_response(),
                Self::NotRegistered => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Driver profile not found" })),
                )
                    .into_response(),
                Self::FailedToFetchOrders => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch orders" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
