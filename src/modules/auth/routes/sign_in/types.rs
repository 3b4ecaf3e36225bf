pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        pub email: String,
        pub password: String,
    }
}

pub mod response {
    use crate::modules::auth::service::token::TokenPair;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        SignedIn(TokenPair),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SignedIn(tokens) => (StatusCode::OK, Json(json!(tokens))).into_response(),
            }
        }
    }

    pub enum Error {
        InvalidCredentials,
        SigninFailed,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid email or password" })),
                )
                    .into_response(),
                Self::SigninFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sign in failed!" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
