pub mod request {
    use crate::{
        modules::{
            auth::middleware::Auth,
            order::repository::{OrderSimpleStatus, OrderStatus},
        },
        utils::pagination::Pagination,
    };
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Filters {
        pub restaurant_id: Option<String>,
        pub status: Option<OrderStatus>,
        pub simple_status: Option<OrderSimpleStatus>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub pagination: Pagination,
        pub filters: Filters,
    }
}

pub mod response {
    use crate::{modules::order::repository::Order, utils::pagination::Paginated};
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
        ProfileNotFound,
        FailedToFetchOrders,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ProfileNotFound => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Complete your profile to see orders" })),
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
