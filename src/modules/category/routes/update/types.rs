pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, max = 100, code = "INVALID_NAME", message = "Name must be between 1 and 100 characters"))]
        pub name: String,
    }

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::{
        modules::category::{repository::Category, service},
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        CategoryUpdated(Category),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CategoryUpdated(category) => {
                    (StatusCode::OK, Json(json!(category))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        CategoryNotFound,
        NotRestaurantOwner,
        NameAlreadyInUse,
        FailedToUpdateCategory,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::CategoryNotFound | service::Error::RestaurantNotFound => {
                    Self::CategoryNotFound
                }
                service::Error::NotRestaurantOwner => Self::NotRestaurantOwner,
                service::Error::UnexpectedError => Self::FailedToUpdateCategory,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
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
                Self::NameAlreadyInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "A category with this name already exists" })),
                )
                    .into_response(),
                Self::FailedToUpdateCategory => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update category" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
