pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        MediaDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MediaDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Media deleted" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MediaNotFound,
        NotMediaOwner,
        FailedToDeleteMedia,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MediaNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Media not found" })),
                )
                    .into_response(),
                Self::NotMediaOwner => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "You did not upload this media" })),
                )
                    .into_response(),
                Self::FailedToDeleteMedia => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to delete media" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
