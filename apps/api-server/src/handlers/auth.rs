//! Registration and login handlers.
//!
//! There is no token issuance: a successful login returns the username and the
//! client remembers it.

use actix_web::{HttpResponse, web};

use quickblog_shared::ApiResponse;
use quickblog_shared::dto::{LoginData, LoginRequest, RegisterRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    state.blog.register_user(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("User registered successfully")))
}

/// POST /api/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let username = state.blog.authenticate(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        LoginData { username },
        "Login successful",
    )))
}
