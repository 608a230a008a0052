//! Public article pages, served as complete HTML documents.

use actix_web::{HttpResponse, http::header::ContentType, web};

use quickblog_core::DomainError;

use crate::render::article_page;
use crate::state::AppState;

fn page_error(err: DomainError, not_found: &'static str) -> HttpResponse {
    match err {
        DomainError::NotFound { .. } => HttpResponse::NotFound()
            .content_type(ContentType::plaintext())
            .body(not_found),
        other => {
            tracing::error!(error = %other, "Failed to load article");
            HttpResponse::InternalServerError()
                .content_type(ContentType::plaintext())
                .body("Error loading blog")
        }
    }
}

/// GET /article/{slug}
pub async fn article_by_slug(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match state.blog.resolve_slug(&path).await {
        Ok(post) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(article_page(&post, &state.config.frontend_url)),
        Err(e) => page_error(e, "Article not found"),
    }
}

/// GET /blog/{username}/{id}
pub async fn article_by_id(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (username, id) = path.into_inner();
    match state.blog.get_post(&username, &id).await {
        Ok(post) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(article_page(&post, &state.config.frontend_url)),
        Err(e) => page_error(e, "Blog not found"),
    }
}
