pub mod request {
    use crate::modules::auth::middleware::Auth;
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;

    #[derive(TryFromMultipart)]
    pub struct Body {
        #[form_data(limit = "10MiB")]
        pub image: FieldData<NamedTempFile>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::menu_item::{repository::MenuItem, service};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        ImageUpdated(MenuItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ImageUpdated(menu_item) => {
                    (StatusCode::OK, Json(json!(menu_item))).into_response()
                }
            }
        }
    }

    pub enum Error {
        MenuItemNotFound,
        NotRestaurantOwner,
        FailedToUploadImage,
        FailedToUpdateMenuItem,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::MenuItemNotFound | service::Error::RestaurantNotFound => {
                    Self::MenuItemNotFound
                }
                service::Error::NotRestaurantOwner => Self::NotRestaurantOwner,
                service::Error::CategoryNotInRestaurant | service::Error::UnexpectedError => {
                    Self::FailedToUpdateMenuItem
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
                Self::FailedToUploadImage => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Failed to upload image" })),
                )
                    .into_response(),
                Self::FailedToUpdateMenuItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update menu item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
