use actix_web::{get, web, HttpRequest, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::services::{Assistant, SessionProvider};

use super::api_error::{authenticate, ApiError};

#[get("")]
async fn conversations(
    req: HttpRequest,
    sessions: web::Data<dyn SessionProvider>,
    assistant: web::Data<Assistant>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &sessions).await?;
    let conversations = assistant.store().conversations(user.id).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "conversations": conversations })))
}

#[get("/{conversation_id}/messages")]
async fn messages(
    req: HttpRequest,
    sessions: web::Data<dyn SessionProvider>,
    assistant: web::Data<Assistant>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &sessions).await?;
    let conversation_id = path.into_inner();

    match assistant.store().conversation(conversation_id).await? {
        Some(c) if c.user_id == user.id => {}
        _ => {
            return Err(ApiError::NotFound(format!(
                "conversation {} not found",
                conversation_id
            )))
        }
    }

    let messages = assistant.store().messages(conversation_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "messages": messages })))
}
