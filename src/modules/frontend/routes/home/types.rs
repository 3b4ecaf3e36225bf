pub mod request {
    use crate::utils::pagination::Pagination;

    pub struct Payload {
        pub pagination: Pagination,
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
        FailedToRenderPage,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToRenderPage => {
                    (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::error())).into_response()
                }
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
