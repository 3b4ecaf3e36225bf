pub mod response {
    use axum::{
        extract::Json,
        http::StatusCode,
        response::{IntoResponse, Redirect},
    };
    use serde_json::json;

    pub enum Success {
        RedirectToGoogle(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RedirectToGoogle(url) => Redirect::to(&url).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToStartSignIn,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToStartSignIn => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to start Google sign in" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
