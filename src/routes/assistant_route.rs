use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::services::{Assistant, SessionProvider};

use super::api_error::{authenticate, ApiError};

#[derive(Deserialize)]
struct LocationBody {
    location: String,
}

#[derive(Deserialize)]
struct MessageBody {
    conversation_id: Option<Uuid>,
    message: String,
}

#[get("/open")]
async fn open(
    req: HttpRequest,
    sessions: web::Data<dyn SessionProvider>,
    assistant: web::Data<Assistant>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &sessions).await?;
    let opening = assistant.open_session(&user).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "opening": opening })))
}

#[post("/location")]
async fn set_location(
    req: HttpRequest,
    sessions: web::Data<dyn SessionProvider>,
    assistant: web::Data<Assistant>,
    body: web::Json<LocationBody>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &sessions).await?;
    let reply = assistant.set_location(&user, &body.location).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "reply": reply })))
}

#[post("/message")]
async fn send_message(
    req: HttpRequest,
    sessions: web::Data<dyn SessionProvider>,
    assistant: web::Data<Assistant>,
    body: web::Json<MessageBody>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &sessions).await?;
    let exchange = assistant
        .send_message(&user, body.conversation_id, &body.message)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "conversation_id": exchange.conversation_id,
        "reply": exchange.reply,
    })))
}
