use crate::{
    modules,
    types::{AppContext, AppEnvironment, Config, Context, ToContext},
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors, services::ServeDir, trace};

const ASSETS_DIR: &str = "public/assets";

/// Browsers may call the API from anywhere while developing, and only from the app's own
/// URL in production.
fn allowed_origin(app: &AppContext) -> cors::AllowOrigin {
    match app.environment {
        AppEnvironment::Development => cors::AllowOrigin::any(),
        AppEnvironment::Production => match HeaderValue::from_str(app.url.trim_end_matches('/')) {
            Ok(origin) => cors::AllowOrigin::exact(origin),
            Err(err) => {
                tracing::error!("App url {} is not a valid origin: {}", app.url, err);
                cors::AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        },
    }
}

pub fn router(ctx: Arc<Context>) -> Router {
    let cors = cors::CorsLayer::new()
        .allow_methods([
            Method::OPTIONS,
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(allowed_origin(&ctx.app));

    Router::new()
        .merge(modules::frontend::get_router())
        .nest("/api", modules::get_router())
        .nest_service("/assets", ServeDir::new(ASSETS_DIR))
        .with_state(ctx.clone())
        .layer(Extension(ctx))
        .layer(DefaultBodyLimit::max(1024 * 1024 * 10))
        .layer(trace::TraceLayer::new_for_http())
        .layer(cors)
}

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

impl App {
    pub async fn new() -> Self {
        let ctx: Arc<Context> = Arc::new(Config::default().to_context().await);
        let router = router(ctx.clone());

        Self { ctx, router }
    }

    pub async fn serve(self) {
        let address = format!("{}:{}", self.ctx.app.host, self.ctx.app.port);

        let listener = match TcpListener::bind(&address).await {
            Ok(listener) => listener,
            Err(err) => {
                tracing::error!("Failed to bind to {}: {}", address, err);
                return;
            }
        };

        tracing::info!("App is running on {}", address);

        if let Err(err) = axum::serve(listener, self.router).await {
            tracing::error!("Server stopped: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        router(Arc::new(Context::for_tests()))
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("body is not utf-8")
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/users/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn forged_tokens_are_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/orders")
                    .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn sign_up_reports_validation_errors() {
        let body = serde_json::json!({
            "email": "not-an-email",
            "password": "short",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "CUSTOMER",
        });

        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/auth/sign-up")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let text = body_text(response).await;
        assert!(text.contains("email"));
        assert!(text.contains("password"));
    }

    #[tokio::test]
    async fn webhooks_with_bad_signatures_are_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/payments/webhook")
                    .header("stripe-signature", "t=1,v1=deadbeef")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn static_pages_render_html() {
        for uri in ["/sign-in", "/sign-up", "/dashboard/driver"] {
            let response = app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            let text = body_text(response).await;
            assert!(text.starts_with("<!DOCTYPE html>"), "{uri}");
            assert!(text.contains("/assets/app.js"), "{uri}");
        }
    }

    async fn preflight_origin(ctx: Context, origin: &str) -> Option<String> {
        let response = router(Arc::new(ctx))
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/restaurants")
                    .header(header::ORIGIN, origin)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|value| value.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn any_origin_is_allowed_while_developing() {
        assert_eq!(
            preflight_origin(Context::for_tests(), "http://localhost:5173").await,
            Some(String::from("*"))
        );
    }

    #[tokio::test]
    async fn production_only_allows_the_app_url() {
        let mut ctx = Context::for_tests();
        ctx.app.environment = AppEnvironment::Production;
        ctx.app.url = String::from("https://food.example.com/");

        assert_eq!(
            preflight_origin(ctx.clone(), "https://food.example.com").await,
            Some(String::from("https://food.example.com"))
        );
        assert_eq!(preflight_origin(ctx, "https://evil.example.com").await, None);
    }

    #[tokio::test]
    async fn assets_are_served() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/assets/app.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
