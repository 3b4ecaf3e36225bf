pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Params {
        pub code: Option<String>,
        pub state: Option<String>,
        pub error: Option<String>,
    }
}

pub mod response {
    use crate::modules::auth::service::token::TokenPair;
    use axum::{
        extract::Json,
        http::StatusCode,
        response::{IntoResponse, Redirect},
    };
    use serde_json::json;

    pub enum Success {
        SignedIn(TokenPair),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SignedIn(tokens) => Redirect::to(&format!(
                    "/auth/complete#access_token={}&refresh_token={}",
                    tokens.access_token, tokens.refresh_token
                ))
                .into_response(),
            }
        }
    }

    pub enum Error {
        ConsentDenied,
        InvalidState,
        UnverifiedEmail,
        LinkedToAnotherAccount,
        FailedToContactGoogle,
        SigninFailed,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ConsentDenied => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Google sign in was cancelled" })),
                )
                    .into_response(),
                Self::InvalidState => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid or expired sign in request" })),
                )
                    .into_response(),
                Self::UnverifiedEmail => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Google account email is not verified" })),
                )
                    .into_response(),
                Self::LinkedToAnotherAccount => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Email is already linked to another Google account" })),
                )
                    .into_response(),
                Self::FailedToContactGoogle => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Failed to reach Google" })),
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
