pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Params {
        #[validate(range(min = -90.0, max = 90.0, code = "INVALID_LATITUDE"))]
        pub latitude: f64,
        #[validate(range(min = -180.0, max = 180.0, code = "INVALID_LONGITUDE"))]
        pub longitude: f64,
        pub radius_km: Option<f64>,
    }
}

pub mod response {
    use crate::{modules::restaurant::repository::RestaurantWithLocation, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::Serialize;
    use serde_json::json;
    use validator::ValidationErrors;

    #[derive(Serialize)]
    pub struct NearbyRestaurant {
        #[serde(flatten)]
        pub restaurant: RestaurantWithLocation,
        pub distance_km: f64,
    }

    pub enum Success {
        Restaurants(Vec<NearbyRestaurant>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Restaurants(restaurants) => {
                    (StatusCode::OK, Json(json!({ "items": restaurants }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        FailedToFetchRestaurants,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
                Self::FailedToFetchRestaurants => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch restaurants" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
