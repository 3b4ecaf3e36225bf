use super::service::token;
use crate::modules::user::{self, repository::User};
use crate::types::Context;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::RequestPartsExt;
use axum::{async_trait, Json};
use axum::{extract::Extension, http, http::request::Parts, response::Response};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

enum Error {
    InvalidSession,
}

fn get_token_from_header(header: &str) -> Result<&str, Error> {
    match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token.trim())
        }
        _ => Err(Error::InvalidSession),
    }
}

async fn get_user_from_header(ctx: Arc<Context>, header: &str) -> Result<User, Error> {
    let access_token = get_token_from_header(header)?;
    let claims = token::decode(
        &ctx.auth.jwt_secret,
        access_token,
        token::TokenKind::Access,
        chrono::Utc::now().timestamp(),
    )
    .map_err(|err| {
        tracing::debug!("Rejected access token: {:?}", err);
        Error::InvalidSession
    })?;

    user::repository::find_by_id(&ctx.db_conn.pool, claims.sub)
        .await
        .map_err(|_| Error::InvalidSession)?
        .ok_or(Error::InvalidSession)
}

#[derive(Serialize, Clone)]
pub struct Auth {
    pub user: User,
}

fn invalid_session() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Invalid session token"})),
    )
        .into_response()
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|err| {
                tracing::error!("Context missing from request extensions: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            })?;

        let headers = parts
            .extract::<HeaderMap>()
            .await
            .map_err(|_| invalid_session())?;

        let auth_header = headers
            .get(http::header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or_else(invalid_session)?;

        get_user_from_header(ctx, auth_header)
            .await
            .map(|user| Self { user })
            .map_err(|_| invalid_session())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_tokens_are_read_from_the_header() {
        assert!(matches!(get_token_from_header("Bearer abc.def"), Ok("abc.def")));
        assert!(matches!(get_token_from_header("bearer abc"), Ok("abc")));
        assert!(get_token_from_header("Basic abc").is_err());
        assert!(get_token_from_header("Bearer").is_err());
    }
}
