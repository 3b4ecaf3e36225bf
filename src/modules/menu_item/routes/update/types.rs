pub mod request {
    use crate::{modules::auth::middleware::Auth, utils::validation::validate_price};
    use bigdecimal::BigDecimal;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, max = 150, code = "INVALID_NAME", message = "Name must be between 1 and 150 characters"))]
        pub name: Option<String>,
        pub description: Option<String>,
        #[validate(custom(function = "validate_price"))]
        pub price: Option<BigDecimal>,
        pub category_id: Option<String>,
        pub is_available: Option<bool>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
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
        MenuItemUpdated(MenuItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItemUpdated(menu_item) => {
                    (StatusCode::OK, Json(json!(menu_item))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        MenuItemNotFound,
        NotRestaurantOwner,
        CategoryNotInRestaurant,
        FailedToUpdateMenuItem,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::MenuItemNotFound | service::Error::RestaurantNotFound => {
                    Self::MenuItemNotFound
                }
                service::Error::NotRestaurantOwner => Self::NotRestaurantOwner,
                service::Error::CategoryNotInRestaurant => Self::CategoryNotInRestaurant,
                service::Error::UnexpectedError => Self::FailedToUpdateMenuItem,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
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
                Self::CategoryNotInRestaurant => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Category does not belong to this restaurant" })),
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
