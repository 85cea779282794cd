//! HTTP handlers and route configuration.

mod forms;
mod gallery;
mod health;
mod posts;

use actix_web::{ResponseError, web};

use crate::middleware::error::AppError;
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    let throttle = RateLimitMiddleware::new(state.form_limiter.clone());

    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let error = AppError::BadRequest(err.to_string());
        actix_web::error::InternalError::from_response(err, error.error_response()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let error = AppError::BadRequest(err.to_string());
        actix_web::error::InternalError::from_response(err, error.error_response()).into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            // Posts - static segments before `{id}`
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/featured", web::get().to(posts::list_featured))
                    .route("/recent", web::get().to(posts::list_recent))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}/comments", web::get().to(posts::list_comments))
                    .route("/{id}/comments", web::post().to(posts::create_comment)),
            )
            .service(
                web::scope("/gallery")
                    .route("", web::get().to(gallery::list_images))
                    .route("", web::post().to(gallery::create_image)),
            )
            // Public forms are throttled per client
            .service(
                web::resource("/newsletter")
                    .wrap(throttle.clone())
                    .route(web::post().to(forms::subscribe)),
            )
            .service(
                web::resource("/contact")
                    .wrap(throttle)
                    .route(web::post().to(forms::submit_contact)),
            ),
    );
}
