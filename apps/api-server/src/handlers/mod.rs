//! HTTP handlers and route configuration.

mod articles;
mod auth;
mod blogs;
mod health;


use actix_web::web;

use crate::middleware::error::AppError;

/// JSON extractor settings: malformed bodies get the standard error envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected request body");
        AppError::BadRequest(err.to_string()).into()
    })
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check))
        // Public article pages
        .route("/article/{slug}", web::get().to(articles::article_by_slug))
        .route("/blog/{username}/{id}", web::get().to(articles::article_by_id))
        .service(
            web::scope("/api")
                // Auth routes
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                // Post routes
                .route("/blogs", web::post().to(blogs::create))
                .route("/blogs", web::get().to(blogs::list_all))
                .route("/blogs/check-title", web::post().to(blogs::check_title))
                .route("/blogs/{username}", web::get().to(blogs::list_by_author))
                .route("/blogs/{username}/{id}", web::put().to(blogs::update))
                .route("/blogs/{username}/{id}", web::delete().to(blogs::delete)),
        );
}
