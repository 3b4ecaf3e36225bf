pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Filters {
        pub restaurant_id: String,
    }

    pub struct Payload {
        pub filters: Filters,
    }
}

pub mod response {
    use crate::modules::category::repository::Category;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Categories(Vec<Category>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Categories(categories) => {
                    (StatusCode::OK, Json(json!({ "items": categories }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToFetchCategories,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchCategories => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch categories" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
