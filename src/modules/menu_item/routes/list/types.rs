pub mod request {
    use crate::{modules::menu_item::repository, utils::pagination::Pagination};

    pub type Filters = repository::Filters;

    pub struct Payload {
        pub pagination: Pagination,
        pub filters: Filters,
    }
}

pub mod response {
    use crate::{modules::menu_item::repository::MenuItem, utils::pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        MenuItems(Paginated<MenuItem>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItems(page) => (StatusCode::OK, Json(json!(page))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchMenuItems,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchMenuItems => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch menu items" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
