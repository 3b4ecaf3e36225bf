pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
    }
}

pub mod response {
    use crate::modules::restaurant::service;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        RestaurantDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Restaurant deleted" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        RestaurantNotFound,
        NotRestaurantOwner,
        HasActiveOrders,
        FailedToDeleteRestaurant,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::RestaurantNotFound => Self::RestaurantNotFound,
                service::Error::NotRestaurantOwner | service::Error::NotOwner => {
                    Self::NotRestaurantOwner
                }
                service::Error::UnexpectedError => Self::FailedToDeleteRestaurant,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Restaurant not found" })),
                )
                    .into_response(),
                Self::NotRestaurantOwner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "You are not the owner of this restaurant" })),
                )
                    .into_response(),
                Self::HasActiveOrders => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Restaurant still has orders in progress" })),
                )
                    .into_response(),
                Self::FailedToDeleteRestaurant => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to delete restaurant" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
