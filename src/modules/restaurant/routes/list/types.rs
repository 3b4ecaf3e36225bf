pub mod request {
    use crate::utils::pagination::Pagination;
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Filters {
        pub search: Option<String>,
        pub owner_id: Option<String>,
        pub is_open: Option<bool>,
    }

    pub struct Payload {
        pub pagination: Pagination,
        pub filters: Filters,
    }
}

pub mod response {
    use crate::{modules::restaurant::repository::Restaurant, utils::pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Restaurants(Paginated<Restaurant>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Restaurants(page) => (StatusCode::OK, Json(json!(page))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchRestaurants,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
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
