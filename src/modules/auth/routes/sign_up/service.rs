use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{password, token},
        user,
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let password_hash =
        password::hash(&payload.password).map_err(|_| response::Error::SignupFailed)?;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::SignupFailed
    })?;

    if user::repository::find_by_email(&mut *tx, payload.email.clone())
        .await
        .map_err(|_| response::Error::SignupFailed)?
        .is_some()
    {
        return Err(response::Error::EmailAlreadyInUse);
    }

    let user = user::repository::create(
        &mut *tx,
        user::repository::CreateUserPayload {
            email: payload.email,
            password_hash: Some(password_hash),
            google_id: None,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone_number: payload.phone_number,
            role: payload.role,
        },
    )
    .await
    .map_err(|_| response::Error::SignupFailed)?;

    user::repository::create_profile(&mut *tx, &user)
        .await
        .map_err(|_| response::Error::SignupFailed)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::SignupFailed
    })?;

    tracing::info!("User {} signed up as {}", user.id, user.role);

    token::issue_pair(&ctx.auth, &user, chrono::Utc::now().timestamp())
        .map_err(|_| response::Error::SignupFailed)
        .map(response::Success::SignedUp)
}
