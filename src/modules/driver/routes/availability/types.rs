pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub is_available: bool,
    }

    pub struct Payload {
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::driver::{repository::Driver, service};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        AvailabilityUpdated(Driver),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AvailabilityUpdated(driver) => {
                    (StatusCode::OK, Json(json!(driver))).into_response()
                }
            }
        }
    }

    pub enum Error {
        NotDriver,
        NotRegistered,
        FailedToUpdateAvailability,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::NotDriver => Self::NotDriver,
                service::Error::NotRegistered => Self::NotRegistered,
                service::Error::UnexpectedError => Self::FailedToUpdateAvailability,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::NotDriver => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only drivers can access this resource" })),
                )
                    .into_response(),
                Self::NotRegistered => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Driver profile not found" })),
                )
                    .into_response(),
                Self::FailedToUpdateAvailability => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update availability" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
