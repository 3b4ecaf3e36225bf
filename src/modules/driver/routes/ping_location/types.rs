pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(range(min = -90.0, max = 90.0, code = "INVALID_LATITUDE"))]
        pub latitude: f64,
        #[validate(range(min = -180.0, max = 180.0, code = "INVALID_LONGITUDE"))]
        pub longitude: f64,
    }

    pub struct Payload {
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::{
        modules::{driver::service, location::repository::GeoLocation},
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        LocationSaved(GeoLocation),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::LocationSaved(location) => {
                    (StatusCode::OK, Json(json!(location))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        NotDriver,
        NotRegistered,
        FailedToSaveLocation,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::NotDriver => Self::NotDriver,
                service::Error::NotRegistered => Self::NotRegistered,
                service::Error::UnexpectedError => Self::FailedToSaveLocation,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
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
                Self::FailedToSaveLocation => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to save location" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
