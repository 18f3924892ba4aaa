use actix_web::{
    http::{header::AUTHORIZATION, StatusCode},
    web, HttpRequest, HttpResponse, ResponseError,
};
use serde_json::json;
use thiserror::Error;

use crate::{
    dal::StoreError,
    domain::User,
    services::{AssistantError, SessionError, SessionProvider},
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not signed in")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Upstream(String),
    #[error("Something went wrong")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}

impl From<SessionError> for ApiError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::InvalidCredentials => ApiError::Unauthorized,
            e => {
                log::error!("Auth provider error: {:?}", e);
                ApiError::Upstream("Auth provider unavailable".to_string())
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        log::error!("Record store error: {:?}", value);
        ApiError::Internal
    }
}

impl From<AssistantError> for ApiError {
    fn from(value: AssistantError) -> Self {
        match value {
            AssistantError::MessageTooShort => ApiError::BadRequest(value.to_string()),
            AssistantError::ConversationNotFound(_) => ApiError::NotFound(value.to_string()),
            AssistantError::Store(e) => e.into(),
        }
    }
}

pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
}

pub async fn authenticate(
    req: &HttpRequest,
    sessions: &web::Data<dyn SessionProvider>,
) -> Result<User, ApiError> {
    let token = bearer_token(req).ok_or(ApiError::Unauthorized)?;
    sessions
        .current_user(token)
        .await?
        .ok_or(ApiError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use actix_web::{body::to_bytes, test::TestRequest, ResponseError};

    use super::{bearer_token, ApiError};

    #[test]
    fn bearer_token_requires_scheme_and_value() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def"));

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer   "))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);
    }

    #[actix_web::test]
    async fn errors_render_as_unsuccessful_json() {
        let res = ApiError::BadRequest("bad".to_string()).error_response();
        assert_eq!(res.status().as_u16(), 400);

        let body = to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "bad"}));
    }
}
