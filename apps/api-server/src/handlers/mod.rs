//! HTTP handlers and route configuration.

mod blog;
mod health;
mod reply;


use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(web::scope("/api").route("/health", web::get().to(health::health_check)))
        .service(
            web::scope("/blog")
                .route("", web::get().to(blog::list_blogs))
                .route("", web::post().to(blog::create_blog))
                .route("/{blog_id}", web::get().to(blog::get_blog))
                .route("/{blog_id}", web::put().to(blog::update_blog))
                .route("/{blog_id}", web::delete().to(blog::delete_blog)),
        )
        .service(
            web::scope("/reply")
                .route("", web::post().to(reply::create_reply))
                .route("/{blog_id}/all", web::get().to(reply::list_replies))
                .route("/{reply_id}", web::get().to(reply::get_reply))
                .route("/{reply_id}", web::put().to(reply::update_reply))
                .route("/{reply_id}", web::delete().to(reply::delete_reply))
                .route("/{reply_id}/", web::delete().to(reply::delete_reply)),
        );
}

/// 200 response carrying a plain-text confirmation.
fn confirmation(message: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(message)
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}
