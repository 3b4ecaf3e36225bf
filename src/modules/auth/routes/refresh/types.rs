pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        pub refresh_token: String,
    }
}

pub mod response {
    use crate::modules::auth::service::token::TokenPair;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Refreshed(TokenPair),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Refreshed(tokens) => (StatusCode::OK, Json(json!(tokens))).into_response(),
            }
        }
    }

    pub enum Error {
        InvalidRefreshToken,
        FailedToRefresh,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidRefreshToken => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid refresh token" })),
                )
                    .into_response(),
                Self::FailedToRefresh => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to refresh tokens" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
