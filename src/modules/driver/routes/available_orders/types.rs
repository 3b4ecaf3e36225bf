pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Params {
        #[validate(range(min = -90.0, max = 90.0, code = "INVALID_LATITUDE"))]
        pub latitude: Option<f64>,
        #[validate(range(min = -180.0, max = 180.0, code = "INVALID_LONGITUDE"))]
        pub longitude: Option<f64>,
        pub radius_km: Option<f64>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub params: Params,
    }
}

pub mod response {
    use crate::{
        modules::{driver::service, order::repository::PickupOrder},
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::Serialize;
    use serde_json::json;
    use validator::ValidationErrors;

    #[derive(Serialize)]
    pub struct AvailableOrder {
        #[serde(flatten)]
        pub order: PickupOrder,
        pub distance_km: f64,
    }

    pub enum Success {
        Orders(Vec<AvailableOrder>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Orders(orders) => {
                    (StatusCode::OK, Json(json!({ "items": orders }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        NotDriver,
        NotRegistered,
        LocationUnknown,
        FailedToFetchOrders,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::NotDriver => Self::NotDriver,
                service::Error::NotRegistered => Self::NotRegistered,
                service::Error::UnexpectedError => Self::FailedToFetchOrders,
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
                Self::LocationUnknown => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Share your location or pass latitude and longitude"
                    })),
                )
                    .into_response(),
                Self::FailedToFetchOrders => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch orders" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
