use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;

use crate::types::{Context, GoogleContext};

#[derive(Debug)]
pub enum Error {
    RequestNotSent,
    InvalidHttpResponseStatusCode,
    FailedToDecodeResponse,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GoogleUser {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

pub fn authorization_url(cfg: &GoogleContext, state: &str) -> String {
    let params = [
        ("response_type", "code"),
        ("client_id", cfg.client_id.as_str()),
        ("redirect_uri", cfg.redirect_url.as_str()),
        ("scope", "openid email profile"),
        ("state", state),
        ("prompt", "select_account"),
    ];

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", cfg.auth_endpoint, query)
}

async fn read_json<R: serde::de::DeserializeOwned>(res: reqwest::Response) -> Result<R, Error> {
    let status = res.status();
    let data = res.text().await.map_err(|err| {
        tracing::error!("Failed to read Google response: {}", err);
        Error::FailedToDecodeResponse
    })?;

    if status != StatusCode::OK {
        tracing::error!("Got unexpected http response status from Google: {} {}", status, data);
        return Err(Error::InvalidHttpResponseStatusCode);
    }

    serde_json::from_str::<R>(&data).map_err(|err| {
        tracing::error!("Failed to decode Google response: {}", err);
        Error::FailedToDecodeResponse
    })
}

/// Trades an authorization code for the signed-in Google account.
pub async fn exchange_code(ctx: Arc<Context>, code: String) -> Result<GoogleUser, Error> {
    let client = reqwest::Client::new();

    let res = client
        .post(&ctx.google.token_endpoint)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("client_id", ctx.google.client_id.as_str()),
            ("client_secret", ctx.google.client_secret.as_str()),
            ("redirect_uri", ctx.google.redirect_url.as_str()),
        ])
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to exchange Google authorization code: {}", err);
            Error::RequestNotSent
        })?;

    let tokens = read_json::<TokenResponse>(res).await?;

    let res = client
        .get(&ctx.google.userinfo_endpoint)
        .bearer_auth(tokens.access_token)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch Google user info: {}", err);
            Error::RequestNotSent
        })?;

    read_json::<GoogleUser>(res).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_url_carries_the_encoded_parameters() {
        let cfg = GoogleContext {
            client_id: String::from("client-id"),
            client_secret: String::from("secret"),
            redirect_url: String::from("http://localhost:8000/api/auth/google/callback"),
            auth_endpoint: String::from("https://accounts.google.com/o/oauth2/v2/auth"),
            token_endpoint: String::new(),
            userinfo_endpoint: String::new(),
        };

        let url = authorization_url(&cfg, "state.token");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A8000%2Fapi%2Fauth%2Fgoogle%2Fcallback"
        ));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains("state=state.token"));
    }
}
