pub mod request {
    use crate::{modules::auth::middleware::Auth, utils::validation::validate_phone_number};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, code = "INVALID_FIRST_NAME", message = "First name is required"))]
        pub first_name: Option<String>,
        #[validate(length(min = 1, code = "INVALID_LAST_NAME", message = "Last name is required"))]
        pub last_name: Option<String>,
        #[validate(custom(function = "validate_phone_number"))]
        pub phone_number: Option<String>,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::{modules::user::repository::User, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        UserUpdated(User),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UserUpdated(user) => (StatusCode::OK, Json(json!(user))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        FailedToUpdateUser,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
                Self::FailedToUpdateUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update user" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
