pub mod request {
    use crate::modules::auth::middleware::Auth;
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;

    #[derive(TryFromMultipart)]
    pub struct Body {
        #[form_data(limit = "10MiB")]
        pub cover_image: FieldData<NamedTempFile>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::restaurant::{repository::Restaurant, service};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        CoverImageUpdated(Restaurant),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CoverImageUpdated(restaurant) => {
                    (StatusCode::OK, Json(json!(restaurant))).into_response()
                }
            }
        }
    }

    pub enum Error {
        RestaurantNotFound,
        NotRestaurantOwner,
        FailedToUploadImage,
        FailedToUpdateRestaurant,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::RestaurantNotFound => Self::RestaurantNotFound,
                service::Error::NotRestaurantOwner | service::Error::NotOwner => {
                    Self::NotRestaurantOwner
                }
                service::Error::UnexpectedError => Self::FailedToUpdateRestaurant,
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
                Self::FailedToUploadImage => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Failed to upload cover image" })),
                )
                    .into_response(),
                Self::FailedToUpdateRestaurant => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update restaurant" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
