use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{google, token},
        user::{self, repository::User},
    },
    types::Context,
};
use std::sync::Arc;

async fn create_user(ctx: Arc<Context>, account: google::GoogleUser) -> Result<User, response::Error> {
    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::SigninFailed
    })?;

    let first_name = account.given_name.clone().unwrap_or_else(|| {
        account
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string()
    });

    let user = user::repository::create(
        &mut *tx,
        user::repository::CreateUserPayload {
            email: account.email,
            password_hash: None,
            google_id: Some(account.sub),
            first_name,
            last_name: account.family_name.unwrap_or_default(),
            phone_number: None,
            role: user::repository::Role::Customer,
        },
    )
    .await
    .map_err(|_| response::Error::SigninFailed)?;

    user::repository::create_profile(&mut *tx, &user)
        .await
        .map_err(|_| response::Error::SigninFailed)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::SigninFailed
    })?;

    tracing::info!("Created user {} from Google sign in", user.id);

    Ok(user)
}

/// An account keeps the first Google identity linked to it.
fn can_link(user: &User, google_id: &str) -> bool {
    user.google_id.as_deref().map_or(true, |linked| linked == google_id)
}

async fn resolve_user(ctx: Arc<Context>, account: google::GoogleUser) -> Result<User, response::Error> {
    if let Some(user) = user::repository::find_by_google_id(&ctx.db_conn.pool, account.sub.clone())
        .await
        .map_err(|_| response::Error::SigninFailed)?
    {
        return Ok(user);
    }

    if !account.email_verified {
        return Err(response::Error::UnverifiedEmail);
    }

    match user::repository::find_by_email(&ctx.db_conn.pool, account.email.clone())
        .await
        .map_err(|_| response::Error::SigninFailed)?
    {
        Some(user) if !can_link(&user, &account.sub) => {
            tracing::warn!("User {} is already linked to another Google account", user.id);
            Err(response::Error::LinkedToAnotherAccount)
        }
        Some(user) => user::repository::link_google_id(&ctx.db_conn.pool, user.id, account.sub)
            .await
            .map_err(|_| response::Error::SigninFailed),
        None => create_user(ctx, account).await,
    }
}

pub async fn service(ctx: Arc<Context>, params: request::Params) -> response::Response {
    if let Some(error) = params.error {
        tracing::warn!("Google sign in returned an error: {}", error);
        return Err(response::Error::ConsentDenied);
    }

    let now = chrono::Utc::now().timestamp();

    let state = params.state.ok_or(response::Error::InvalidState)?;
    token::decode(&ctx.auth.jwt_secret, &state, token::TokenKind::OauthState, now).map_err(
        |err| {
            tracing::warn!("Rejected Google sign in state: {:?}", err);
            response::Error::InvalidState
        },
    )?;

    let code = params.code.ok_or(response::Error::ConsentDenied)?;
    let account = google::exchange_code(ctx.clone(), code)
        .await
        .map_err(|_| response::Error::FailedToContactGoogle)?;

    let user = resolve_user(ctx.clone(), account).await?;

    token::issue_pair(&ctx.auth, &user, now)
        .map_err(|_| response::Error::SigninFailed)
        .map(response::Success::SignedIn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user::repository::Role;

    fn user(google_id: Option<&str>) -> User {
        User {
            id: String::from("01J0USER"),
            email: String::from("ada@example.com"),
            password_hash: None,
            google_id: google_id.map(String::from),
            first_name: String::from("Ada"),
            last_name: String::from("Lovelace"),
            phone_number: None,
            role: Role::Customer,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: None,
        }
    }

    #[test]
    fn unlinked_accounts_can_be_linked() {
        assert!(can_link(&user(None), "google-1"));
        assert!(can_link(&user(Some("google-1")), "google-1"));
    }

    #[test]
    fn accounts_linked_to_another_google_identity_are_refused() {
        assert!(!can_link(&user(Some("google-1")), "google-2"));
    }
}
