pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, max = 100, code = "INVALID_NAME", message = "Name must be between 1 and 100 characters"))]
        pub name: String,
        pub restaurant_id: String,
    }

    pub struct Payload {
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::{
        modules::{category::repository::Category, restaurant::service},
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        CategoryCreated(Category),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CategoryCreated(category) => {
                    (StatusCode::CREATED, Json(json!(category))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        RestaurantNotFound,
        NotRestaurantOwner,
        NameAlreadyInUse,
        FailedToCreateCategory,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::RestaurantNotFound => Self::RestaurantNotFound,
                service::Error::NotRestaurantOwner | service::Error::NotOwner => {
                    Self::NotRestaurantOwner
                }
                service::Error::UnexpectedError => Self::FailedToCreateCategory,
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
                Self::NameAlreadyInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "A category with this name already exists" })),
                )
                    .into_response(),
                Self::FailedToCreateCategory => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create category" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
