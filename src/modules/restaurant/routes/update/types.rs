pub mod request {
    use crate::{
        modules::auth::middleware::Auth,
        utils::validation::{validate_phone_number, validate_time_of_day},
    };
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, code = "INVALID_NAME", message = "Name cannot be empty"))]
        pub name: Option<String>,
        pub description: Option<String>,
        #[validate(length(min = 1, code = "INVALID_ADDRESS", message = "Address cannot be empty"))]
        pub address: Option<String>,
        #[validate(custom(function = "validate_phone_number"))]
        pub phone_number: Option<String>,
        #[validate(custom(function = "validate_time_of_day"))]
        pub opening_time: Option<String>,
        #[validate(custom(function = "validate_time_of_day"))]
        pub closing_time: Option<String>,
        pub is_open: Option<bool>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::{
        modules::restaurant::{repository::Restaurant, service},
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        RestaurantUpdated(Restaurant),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantUpdated(restaurant) => {
                    (StatusCode::OK, Json(json!(restaurant))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        RestaurantNotFound,
        NotRestaurantOwner,
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
