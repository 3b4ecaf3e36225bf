pub mod request {
    pub struct Payload {
        pub id: String,
    }
}

pub mod response {
    use crate::modules::frontend::pages;
    use axum::{
        http::StatusCode,
        response::{Html, IntoResponse},
    };

    pub enum Success {
        Page(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Page(html) => (StatusCode::OK, Html(html)).into_response(),
            }
        }
    }

    pub enum Error {
        RestaurantNotFound,
        FailedToRenderPage,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RestaurantNotFound => {
                    (StatusCode::NOT_FOUND, Html(pages::not_found("Restaurant"))).into_response()
                }
                Self::FailedToRenderPage => {
                    (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::error())).into_response()
                }
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
