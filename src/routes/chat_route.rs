use actix_web::{post, web, HttpResponse};
use serde_json::{json, Value};

use crate::services::ChatCompleter;

#[post("/chat")]
async fn chat(chat: web::Data<dyn ChatCompleter>, body: web::Bytes) -> HttpResponse {
    // An unreadable body is reported like any other failed round trip.
    let payload = match serde_json::from_slice::<Value>(&body) {
        Ok(payload) if !payload.is_null() => payload,
        Ok(_) => return upstream_failure("request body is null"),
        Err(e) => return upstream_failure(e),
    };

    let prompt = payload
        .get("prompt")
        .and_then(|p| p.as_str())
        .filter(|p| !p.is_empty());

    let Some(prompt) = prompt else {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "error": "Missing or invalid prompt",
        }));
    };

    match chat.complete(prompt).await {
        Ok(reply) => HttpResponse::Ok().json(json!({ "success": true, "reply": reply })),
        Err(e) => upstream_failure(e),
    }
}

fn upstream_failure(e: impl std::fmt::Debug) -> HttpResponse {
    log::error!("OpenAI API error: {:?}", e);
    HttpResponse::Ok().json(json!({
        "success": false,
        "error": "Failed to connect to OpenAI API",
    }))
}
