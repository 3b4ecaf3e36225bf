use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{password, token},
        user,
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = user::repository::find_by_email(&ctx.db_conn.pool, payload.email)
        .await
        .map_err(|_| response::Error::SigninFailed)?
        .ok_or(response::Error::InvalidCredentials)?;

    // Accounts created through Google have no password to check against.
    let password_hash = user
        .password_hash
        .as_deref()
        .ok_or(response::Error::InvalidCredentials)?;

    if !password::verify(&payload.password, password_hash) {
        tracing::warn!("Failed sign in attempt for user {}", user.id);
        return Err(response::Error::InvalidCredentials);
    }

    token::issue_pair(&ctx.auth, &user, chrono::Utc::now().timestamp())
        .map_err(|_| response::Error::SigninFailed)
        .map(response::Success::SignedIn)
}
