use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Session, User};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("auth provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Account and session lookups backed by an external identity provider.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<User, SessionError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), SessionError>;
    async fn current_user(&self, access_token: &str) -> Result<Option<User>, SessionError>;
}

pub struct SupabaseAuth {
    client: Client,
    anon_key: String,
    url: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(Session),
    User(User),
}

#[derive(Deserialize, Default)]
struct ApiErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl SupabaseAuth {
    pub fn new(url: String, anon_key: String) -> Self {
        let client = reqwest::Client::new();

        SupabaseAuth {
            client,
            anon_key,
            url: format!("{}/auth/v1", url.trim_end_matches('/')),
        }
    }

    async fn rejection(res: reqwest::Response) -> SessionError {
        let status = res.status().as_u16();
        let body = res.json::<ApiErrorBody>().await.unwrap_or_default();
        let message = body
            .error_description
            .or(body.msg)
            .or(body.message)
            .unwrap_or_else(|| "no details".to_string());

        log::error!("Auth provider returned {}: {}", status, message);
        SessionError::Rejected { status, message }
    }
}

#[async_trait]
impl SessionProvider for SupabaseAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let res = self
            .client
            .post(format!("{}/signup", self.url))
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::rejection(res).await);
        }

        // Returns a session when email confirmation is off, a bare user otherwise.
        match res.json::<SignUpResponse>().await? {
            SignUpResponse::Session(session) => Ok(session.user),
            SignUpResponse::User(user) => Ok(user),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let res = self
            .client
            .post(format!("{}/token", self.url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;

        match res.status() {
            status if status.is_success() => Ok(res.json::<Session>().await?),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                log::info!("Sign in rejected for {}", email);
                Err(SessionError::InvalidCredentials)
            }
            _ => Err(Self::rejection(res).await),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), SessionError> {
        let res = self
            .client
            .post(format!("{}/logout", self.url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match res.status().is_success() {
            true => Ok(()),
            false => Err(Self::rejection(res).await),
        }
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<User>, SessionError> {
        let res = self
            .client
            .get(format!("{}/user", self.url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match res.status() {
            status if status.is_success() => Ok(Some(res.json::<User>().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Err(Self::rejection(res).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SignUpResponse, SupabaseAuth};

    #[test]
    fn base_url_is_normalized() {
        let auth = SupabaseAuth::new("https://abc.supabase.co/".to_string(), "key".to_string());
        assert_eq!(auth.url, "https://abc.supabase.co/auth/v1");
    }

    #[test]
    fn sign_up_accepts_session_or_user_payloads() {
        let session = r#"{
            "access_token": "at", "refresh_token": "rt", "expires_in": 3600,
            "token_type": "bearer",
            "user": {"id": "7c9e6679-7425-40de-944b-e07fc1f90ae7", "email": "a@b.co"}
        }"#;
        let user = r#"{"id": "7c9e6679-7425-40de-944b-e07fc1f90ae7", "email": "a@b.co", "role": "authenticated"}"#;

        assert!(matches!(
            serde_json::from_str::<SignUpResponse>(session).unwrap(),
            SignUpResponse::Session(_)
        ));
        assert!(matches!(
            serde_json::from_str::<SignUpResponse>(user).unwrap(),
            SignUpResponse::User(_)
        ));
    }
}
