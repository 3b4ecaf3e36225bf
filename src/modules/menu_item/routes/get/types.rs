pub mod request {
    pub struct Payload {
        pub id: String,
    }
}

pub mod response {
    use crate::modules::menu_item::repository::MenuItem;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        MenuItem(MenuItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItem(menu_item) => (StatusCode::OK, Json(json!(menu_item))).into_response(),
            }
        }
    }

    pub enum Error {
        MenuItemNotFound,
        FailedToFetchMenuItem,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuItemNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Menu item not found" })),
                )
                    .into_response(),
                Self::FailedToFetchMenuItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch menu item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
