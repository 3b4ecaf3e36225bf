pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
    }
}

pub mod response {
    use crate::modules::menu_item::service;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        MenuItemDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItemDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Menu item deleted" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MenuItemNotFound,
        NotRestaurantOwner,
        AlreadyOrdered,
        FailedToDeleteMenuItem,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::MenuItemNotFound | service::Error::RestaurantNotFound => {
                    Self::MenuItemNotFound
                }
                service::Error::NotRestaurantOwner => Self::NotRestaurantOwner,
                service::Error::CategoryNotInRestaurant | service::Error::UnexpectedError => {
                    Self::FailedToDeleteMenuItem
                }
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItemNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Menu item not found" })),
                )
                    .into_response(),
                Self::NotRestaurantOwner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "You are not the owner of this restaurant" })),
                )
                    .into_response(),
                Self::AlreadyOrdered => (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "Menu item appears in existing orders, mark it unavailable instead"
                    })),
                )
                    .into_response(),
                Self::FailedToDeleteMenuItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to delete menu item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
