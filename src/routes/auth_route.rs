use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::services::SessionProvider;

use super::api_error::{authenticate, bearer_token, ApiError};

#[derive(Deserialize)]
struct CredentialsBody {
    email: String,
    password: String,
}

impl CredentialsBody {
    fn validate(&self) -> Result<(&str, &str), ApiError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') || self.password.is_empty() {
            return Err(ApiError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }
        Ok((email, self.password.as_str()))
    }
}

#[post("/signup")]
async fn sign_up(
    sessions: web::Data<dyn SessionProvider>,
    body: web::Json<CredentialsBody>,
) -> Result<HttpResponse, ApiError> {
    let (email, password) = body.validate()?;
    let user = sessions.sign_up(email, password).await?;
    log::info!("Signed up user {}", user.id);

    Ok(HttpResponse::Ok().json(json!({ "success": true, "user": user })))
}

#[post("/login")]
async fn login(
    sessions: web::Data<dyn SessionProvider>,
    body: web::Json<CredentialsBody>,
) -> Result<HttpResponse, ApiError> {
    let (email, password) = body.validate()?;
    let session = sessions.sign_in(email, password).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "session": session })))
}

#[post("/logout")]
async fn logout(
    req: HttpRequest,
    sessions: web::Data<dyn SessionProvider>,
) -> Result<HttpResponse, ApiError> {
    let token = bearer_token(&req).ok_or(ApiError::Unauthorized)?;
    sessions.sign_out(token).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[get("/user")]
async fn current_user(
    req: HttpRequest,
    sessions: web::Data<dyn SessionProvider>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &sessions).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "user": user })))
}
