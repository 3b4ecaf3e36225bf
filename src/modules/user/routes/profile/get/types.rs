pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::{location::repository::GeoLocation, user::repository::User};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    pub struct Profile {
        #[serde(flatten)]
        pub user: User,
        pub profile: Option<serde_json::Value>,
        pub location: Option<GeoLocation>,
    }

    pub enum Success {
        Profile(Profile),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Profile(profile) => (StatusCode::OK, Json(json!(profile))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchProfile,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchProfile => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch profile" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
