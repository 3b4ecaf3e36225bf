pub mod request {
    use crate::{
        modules::auth::middleware::Auth,
        utils::validation::{validate_phone_number, validate_time_of_day},
    };
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, code = "INVALID_NAME", message = "Name is required"))]
        pub name: String,
        pub description: String,
        #[validate(length(min = 1, code = "INVALID_ADDRESS", message = "Address is required"))]
        pub address: String,
        #[validate(custom(function = "validate_phone_number"))]
        pub phone_number: String,
        #[validate(custom(function = "validate_time_of_day"))]
        pub opening_time: String,
        #[validate(custom(function = "validate_time_of_day"))]
        pub closing_time: String,
        #[validate(range(min = -90.0, max = 90.0, code = "INVALID_LATITUDE"))]
        pub latitude: Option<f64>,
        #[validate(range(min = -180.0, max = 180.0, code = "INVALID_LONGITUDE"))]
        pub longitude: Option<f64>,
    }

    pub struct Payload {
        pub auth: Auth,
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
        RestaurantCreated(Restaurant),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantCreated(restaurant) => {
                    (StatusCode::CREATED, Json(json!(restaurant))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        NotRestaurantOwner,
        FailedToCreateRestaurant,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::NotRestaurantOwner => Self::NotRestaurantOwner,
                _ => Self::FailedToCreateRestaurant,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
                Self::NotRestaurantOwner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only restaurant owners can create restaurants" })),
                )
                    .into_response(),
                Self::FailedToCreateRestaurant => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create restaurant" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
