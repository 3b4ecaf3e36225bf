use super::types::response;
use crate::{
    modules::auth::service::{google, token},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>) -> response::Response {
    let state = token::issue_oauth_state(&ctx.auth, chrono::Utc::now().timestamp())
        .map_err(|_| response::Error::FailedToStartSignIn)?;

    Ok(response::Success::RedirectToGoogle(
        google::authorization_url(&ctx.google, &state),
    ))
}
