pub mod request {
    use crate::modules::{auth::middleware::Auth, order::repository::OrderStatus};
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub status: OrderStatus,
    }

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::order::{
        repository::{Order, OrderStatus},
        service,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        StatusUpdated(Order),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::StatusUpdated(order) => (StatusCode::OK, Json(json!(order))).into_response(),
            }
        }
    }

    pub enum Error {
        OrderNotFound,
        TransitionNotAllowed(OrderStatus, OrderStatus),
        StatusChanged,
        FailedToUpdateStatus,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::OrderNotFound | service::Error::OrderNotVisible => {
                    Self::OrderNotFound
                }
                service::Error::UnexpectedError => Self::FailedToUpdateStatus,
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
                Self::TransitionNotAllowed(from, to) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": format!(
                            "Cannot move order from {} to {}",
                            from.as_str(),
                            to.as_str()
                        )
                    })),
                )
                    .into_response(),
                Self::StatusChanged => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Order status changed, reload and try again" })),
                )
                    .into_response(),
                Self::FailedToUpdateStatus => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update order status" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

#[cfg(test)]
mod tests {
    use super::response::Error;
    use crate::modules::order::repository::OrderStatus;
    use axum::{http::StatusCode, response::IntoResponse};

    #[test]
    fn lost_races_are_conflicts() {
        assert_eq!(Error::StatusChanged.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(
            Error::TransitionNotAllowed(OrderStatus::Delivered, OrderStatus::Pending)
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }
}
