pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
    }
}

pub mod response {
    use crate::modules::{
        order::{
            repository::{Order, OrderItem},
            service,
        },
        payment::repository::Payment,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    pub struct OrderDetails {
        #[serde(flatten)]
        pub order: Order,
        pub items: Vec<OrderItem>,
        pub payment: Option<Payment>,
        pub restaurant_name: Option<String>,
    }

    pub enum Success {
        Order(OrderDetails),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Order(details) => (StatusCode::OK, Json(json!(details))).into_response(),
            }
        }
    }

    pub enum Error {
        OrderNotFound,
        FailedToFetchOrder,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::OrderNotFound | service::Error::OrderNotVisible => {
                    Self::OrderNotFound
                }
                service::Error::UnexpectedError => Self::FailedToFetchOrder,
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
                Self::FailedToFetchOrder => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch order" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
