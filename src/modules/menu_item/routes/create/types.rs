pub mod request {
    use crate::{modules::auth::middleware::Auth, utils::validation::validate_price};
    use async_trait::async_trait;
    use axum::extract::multipart::Field;
    use axum_typed_multipart::{FieldData, TryFromField, TryFromMultipart, TypedMultipartError};
    use bigdecimal::BigDecimal;
    use std::str::FromStr;
    use tempfile::NamedTempFile;
    use validator::Validate;

    #[derive(Debug, Clone)]
    pub struct Price(pub BigDecimal);

    #[async_trait]
    impl TryFromField for Price {
        async fn try_from_field<'a>(
            field: Field<'a>,
            _: Option<usize>,
        ) -> Result<Self, TypedMultipartError> {
            let text = field.text().await.map_err(|err| {
                tracing::error!("Error occurred while parsing body: {}", err);
                TypedMultipartError::InvalidRequestBody { source: err }
            })?;

            BigDecimal::from_str(text.trim()).map(Price).map_err(|err| {
                tracing::warn!("Invalid price {:?}: {}", text, err);
                TypedMultipartError::UnknownField {
                    field_name: String::from("price"),
                }
            })
        }
    }

    #[derive(TryFromMultipart)]
    pub struct Body {
        pub restaurant_id: String,
        pub category_id: Option<String>,
        pub name: String,
        pub description: String,
        pub price: Price,
        #[form_data(limit = "10MiB")]
        pub image: FieldData<NamedTempFile>,
    }

    #[derive(Validate)]
    pub struct Details {
        #[validate(length(min = 1, max = 150, code = "INVALID_NAME", message = "Name must be between 1 and 150 characters"))]
        pub name: String,
        pub description: String,
        #[validate(custom(function = "validate_price"))]
        pub price: BigDecimal,
    }

    pub struct Payload {
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::{
        modules::menu_item::{repository::MenuItem, service},
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        MenuItemCreated(MenuItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItemCreated(menu_item) => {
                    (StatusCode::CREATED, Json(json!(menu_item))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        RestaurantNotFound,
        NotRestaurantOwner,
        CategoryNotInRestaurant,
        FailedToUploadImage,
        FailedToCreateMenuItem,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::RestaurantNotFound | service::Error::MenuItemNotFound => {
                    Self::RestaurantNotFound
                }
                service::Error::NotRestaurantOwner => Self::NotRestaurantOwner,
                service::Error::CategoryNotInRestaurant => Self::CategoryNotInRestaurant,
                service::Error::UnexpectedError => Self::FailedToCreateMenuItem,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
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
                Self::CategoryNotInRestaurant => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Category does not belong to this restaurant" })),
                )
                    .into_response(),
                Self::FailedToUploadImage => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Failed to upload image" })),
                )
                    .into_response(),
                Self::FailedToCreateMenuItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create menu item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
