pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
    }
}

pub mod response {
    use crate::modules::{
        location::repository::GeoLocation,
        order::{repository::OrderStatus, service},
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    pub struct Tracking {
        pub order_id: String,
        pub status: OrderStatus,
        pub driver_id: Option<String>,
        pub driver_location: Option<GeoLocation>,
        pub distance_km: Option<f64>,
    }

    pub enum Success {
        Tracking(Tracking),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Tracking(tracking) => (StatusCode::OK, Json(json!(tracking))).into_response(),
            }
        }
    }

    pub enum Error {
        OrderNotFound,
        FailedToTrackOrder,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::OrderNotFound | service::Error::OrderNotVisible => {
                    Self::OrderNotFound
                }
                service::Error::UnexpectedError => Self::FailedToTrackOrder,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order not found" })),
                )
                    .into_response(),
                Self::FailedToTrackOrder => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to track order" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
