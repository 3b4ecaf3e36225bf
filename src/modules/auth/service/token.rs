use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use ulid::Ulid;

use crate::{
    modules::user::repository::{Role, User},
    types::AuthContext,
};

/// Lifetime of an OAuth `state` token, in seconds.
const OAUTH_STATE_TTL: i64 = 600;

const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Debug, PartialEq)]
pub enum Error {
    Malformed,
    InvalidSignature,
    Expired,
    WrongKind,
    UnexpectedError,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
    OauthState,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

fn mac(secret: &str) -> Result<Hmac<Sha256>, Error> {
    Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|err| {
        tracing::error!("Failed to generate mac: {:?}", err);
        Error::UnexpectedError
    })
}

pub fn encode(secret: &str, claims: &Claims) -> Result<String, Error> {
    let payload = serde_json::to_vec(claims).map_err(|err| {
        tracing::error!("Failed to serialize token claims: {}", err);
        Error::UnexpectedError
    })?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(HEADER),
        URL_SAFE_NO_PAD.encode(payload)
    );

    let mut mac = mac(secret)?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

pub fn decode(secret: &str, token: &str, kind: TokenKind, now: i64) -> Result<Claims, Error> {
    let (signing_input, signature) = token.rsplit_once('.').ok_or(Error::Malformed)?;
    let (header, payload) = signing_input.split_once('.').ok_or(Error::Malformed)?;

    let header = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| Error::Malformed)?;
    let header = serde_json::from_slice::<serde_json::Value>(&header).map_err(|_| Error::Malformed)?;
    if header.get("alg").and_then(|alg| alg.as_str()) != Some("HS256") {
        return Err(Error::Malformed);
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| Error::Malformed)?;

    let mut mac = mac(secret)?;
    mac.update(signing_input.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| Error::InvalidSignature)?;

    let payload = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| Error::Malformed)?;
    let claims = serde_json::from_slice::<Claims>(&payload).map_err(|_| Error::Malformed)?;

    if claims.kind != kind {
        return Err(Error::WrongKind);
    }

    if claims.exp <= now {
        return Err(Error::Expired);
    }

    Ok(claims)
}

pub fn issue_pair(cfg: &AuthContext, user: &User, now: i64) -> Result<TokenPair, Error> {
    let claims = |kind: TokenKind, ttl: i64| Claims {
        sub: user.id.clone(),
        role: Some(user.role.clone()),
        kind,
        iat: now,
        exp: now + ttl,
    };

    Ok(TokenPair {
        access_token: encode(
            &cfg.jwt_secret,
            &claims(TokenKind::Access, cfg.access_token_ttl),
        )?,
        refresh_token: encode(
            &cfg.jwt_secret,
            &claims(TokenKind::Refresh, cfg.refresh_token_ttl),
        )?,
        token_type: String::from("Bearer"),
        expires_in: cfg.access_token_ttl,
    })
}

pub fn issue_oauth_state(cfg: &AuthContext, now: i64) -> Result<String, Error> {
    encode(
        &cfg.jwt_secret,
        &Claims {
            sub: Ulid::new().to_string(),
            role: None,
            kind: TokenKind::OauthState,
            iat: now,
            exp: now + OAUTH_STATE_TTL,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    const SECRET: &str = "test-secret";

    fn cfg() -> AuthContext {
        AuthContext {
            jwt_secret: String::from(SECRET),
            access_token_ttl: 3600,
            refresh_token_ttl: 86400,
        }
    }

    fn user() -> User {
        User {
            id: String::from("01HZYUSER"),
            email: String::from("ada@example.com"),
            password_hash: None,
            google_id: None,
            first_name: String::from("Ada"),
            last_name: String::from("Obi"),
            phone_number: None,
            role: Role::Customer,
            created_at: NaiveDateTime::default(),
            updated_at: None,
        }
    }

    #[test]
    fn issued_access_tokens_decode_to_the_user() {
        let pair = issue_pair(&cfg(), &user(), 1_000).unwrap();
        let claims = decode(SECRET, &pair.access_token, TokenKind::Access, 1_001).unwrap();

        assert_eq!(claims.sub, "01HZYUSER");
        assert_eq!(claims.role, Some(Role::Customer));
        assert_eq!(claims.exp, 1_000 + 3600);
        assert_eq!(pair.expires_in, 3600);
    }

    #[test]
    fn token_kinds_are_not_interchangeable() {
        let pair = issue_pair(&cfg(), &user(), 1_000).unwrap();

        assert_eq!(
            decode(SECRET, &pair.refresh_token, TokenKind::Access, 1_001),
            Err(Error::WrongKind)
        );
        assert_eq!(
            decode(SECRET, &pair.access_token, TokenKind::Refresh, 1_001),
            Err(Error::WrongKind)
        );
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let pair = issue_pair(&cfg(), &user(), 1_000).unwrap();
        assert_eq!(
            decode(SECRET, &pair.access_token, TokenKind::Access, 1_000 + 3600),
            Err(Error::Expired)
        );
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let pair = issue_pair(&cfg(), &user(), 1_000).unwrap();
        assert_eq!(
            decode("other-secret", &pair.access_token, TokenKind::Access, 1_001),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn tampered_payloads_are_rejected() {
        let token = issue_pair(&cfg(), &user(), 1_000).unwrap().access_token;
        let mut parts = token.split('.').collect::<Vec<_>>();
        let forged = URL_SAFE_NO_PAD.encode(
            r#"{"sub":"someone-else","role":"CUSTOMER","kind":"access","iat":1000,"exp":99999}"#,
        );
        parts[1] = &forged;

        assert_eq!(
            decode(SECRET, &parts.join("."), TokenKind::Access, 1_001),
            Err(Error::InvalidSignature)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            decode(SECRET, "not-a-token", TokenKind::Access, 0),
            Err(Error::Malformed)
        );
        assert_eq!(
            decode(SECRET, "a.b.c", TokenKind::Access, 0),
            Err(Error::Malformed)
        );
    }

    #[test]
    fn oauth_state_tokens_are_short_lived() {
        let state = issue_oauth_state(&cfg(), 1_000).unwrap();
        assert!(decode(SECRET, &state, TokenKind::OauthState, 1_500).is_ok());
        assert_eq!(
            decode(SECRET, &state, TokenKind::OauthState, 1_000 + OAUTH_STATE_TTL),
            Err(Error::Expired)
        );
    }
}
