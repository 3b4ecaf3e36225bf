pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
    }
}

pub mod response {
    use crate::modules::category::service;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        CategoryDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CategoryDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Category deleted" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        CategoryNotFound,
        NotRestaurantOwner,
        FailedToDeleteCategory,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::CategoryNotFound | service::Error::RestaurantNotFound => {
                    Self::CategoryNotFound
                }
                service::Error::NotRestaurantOwner => Self::NotRestaurantOwner,
                service::Error::UnexpectedError => Self::FailedToDeleteCategory,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CategoryNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Category not found" })),
                )
                    .into_response(),
                Self::NotRestaurantOwner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "You are not the owner of this restaurant" })),
                )
                    .into_response(),
                Self::FailedToDeleteCategory => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to delete category" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
