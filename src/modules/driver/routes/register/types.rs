pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 2, max = 50, code = "INVALID_VEHICLE_TYPE", message = "Vehicle type must be between 2 and 50 characters"))]
        pub vehicle_type: String,
        #[validate(length(min = 2, max = 20, code = "INVALID_LICENSE_PLATE", message = "License plate must be between 2 and 20 characters"))]
        pub license_plate: String,
    }

    pub struct Payload {
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::{
        modules::driver::{repository::Driver, service},
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        DriverRegistered(Driver),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DriverRegistered(driver) => {
                    (StatusCode::CREATED, Json(json!(driver))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        NotDriver,
        AlreadyRegistered,
        FailedToRegisterDriver,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::NotDriver => Self::NotDriver,
                service::Error::NotRegistered | service::Error::UnexpectedError => {
                    Self::FailedToRegisterDriver
                }
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
                Self::NotDriver => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only driver accounts can register as drivers" })),
                )
                    .into_response(),
                Self::AlreadyRegistered => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Driver already registered" })),
                )
                    .into_response(),
                Self::FailedToRegisterDriver => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to register driver" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
