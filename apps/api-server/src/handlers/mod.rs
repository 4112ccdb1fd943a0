//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{error::JsonPayloadError, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{key}", web::get().to(posts::detail))
                    .route("/{key}", web::put().to(posts::update))
                    .route("/{key}", web::delete().to(posts::delete)),
            ),
    );
}

/// Malformed JSON bodies become RFC 7807 `400 Bad Request` responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        tracing::debug!(error = %err, "Rejected request body");
        AppError::BadRequest(err.to_string()).into()
    })
}
