pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::{
        driver::{repository::Driver, service},
        location::repository::GeoLocation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Driver(Driver, Option<GeoLocation>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Driver(driver, location) => {
                    let mut body = json!(driver);
                    body["location"] = json!(location);
                    (StatusCode::OK, Json(body)).into_response()
                }
            }
        }
    }

    pub enum Error {
        NotDriver,
        NotRegistered,
        FailedToFetchDriver,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::NotDriver => Self::NotDriver,
                service::Error::NotRegistered => Self::NotRegistered,
                service::Error::UnexpectedError => Self::FailedToFetchDriver,
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
                Self::FailedToFetchDriver => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch driver" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
