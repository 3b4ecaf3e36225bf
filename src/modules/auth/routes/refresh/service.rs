use super::types::{request, response};
use crate::{modules::auth::service::token, modules::user, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let now = chrono::Utc::now().timestamp();

    let claims = token::decode(
        &ctx.auth.jwt_secret,
        &payload.refresh_token,
        token::TokenKind::Refresh,
        now,
    )
    .map_err(|err| {
        tracing::debug!("Rejected refresh token: {:?}", err);
        response::Error::InvalidRefreshToken
    })?;

    let user = user::repository::find_by_id(&ctx.db_conn.pool, claims.sub)
        .await
        .map_err(|_| response::Error::FailedToRefresh)?
        .ok_or(response::Error::InvalidRefreshToken)?;

    token::issue_pair(&ctx.auth, &user, now)
        .map_err(|_| response::Error::FailedToRefresh)
        .map(response::Success::Refreshed)
}
