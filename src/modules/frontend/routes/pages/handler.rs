use crate::modules::frontend::pages;
use axum::response::Html;

// These pages are shells, app.js fills them in with the signed-in user's data.

pub async fn sign_in() -> Html<String> {
    Html(pages::sign_in())
}

pub async fn sign_up() -> Html<String> {
    Html(pages::sign_up())
}

pub async fn auth_complete() -> Html<String> {
    Html(pages::auth_complete())
}

pub async fn customer_dashboard() -> Html<String> {
    Html(pages::customer_dashboard())
}

pub async fn restaurant_dashboard() -> Html<String> {
    Html(pages::restaurant_dashboard())
}

pub async fn driver_dashboard() -> Html<String> {
    Html(pages::driver_dashboard())
}
