pub mod request {
    use crate::{modules::user::repository::Role, utils::validation::validate_phone_number};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(email(code = "INVALID_USER_EMAIL", message = "Invalid email address"))]
        pub email: String,
        #[validate(length(
            min = 8,
            code = "PASSWORD_TOO_SHORT",
            message = "Password must be at least 8 characters long"
        ))]
        pub password: String,
        #[validate(length(min = 1, code = "INVALID_FIRST_NAME", message = "First name is required"))]
        pub first_name: String,
        #[validate(length(min = 1, code = "INVALID_LAST_NAME", message = "Last name is required"))]
        pub last_name: String,
        #[validate(custom(function = "validate_phone_number"))]
        pub phone_number: Option<String>,
        pub role: Role,
    }
}

pub mod response {
    use crate::{modules::auth::service::token::TokenPair, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        SignedUp(TokenPair),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SignedUp(tokens) => (StatusCode::CREATED, Json(json!(tokens))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        EmailAlreadyInUse,
        SignupFailed,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
                Self::EmailAlreadyInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Email already in use" })),
                )
                    .into_response(),
                Self::SignupFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sign up failed!" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
