pub mod request {
    pub struct Payload {
        pub id: String,
    }
}

pub mod response {
    use crate::modules::location::repository::GeoLocation;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Location(GeoLocation),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Location(location) => (StatusCode::OK, Json(json!(location))).into_response(),
            }
        }
    }

    pub enum Error {
        LocationNotFound,
        FailedToFetchLocation,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::LocationNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Driver location not found" })),
                )
                    .into_response(),
                Self::FailedToFetchLocation => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch driver location" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
