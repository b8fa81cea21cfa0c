//! Blog post endpoints.

use actix_web::{HttpResponse, web};
use quill_core::domain::{BlogPostUpdate, NewBlogPost};
use quill_shared::dto::{CreateBlogRequest, UpdateBlogRequest};

use super::confirmation;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// List every blog post in ascending id order.
///
/// GET /blog
pub async fn list_blogs(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.blogs.find_all().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// View a single post. Each successful view bumps its counter.
///
/// GET /blog/{blog_id}
pub async fn get_blog(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let blog_id = path.into_inner();
    let post = state
        .blogs
        .view_by_id(blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found.".to_string()))?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /blog
pub async fn create_blog(
    state: web::Data<AppState>,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let CreateBlogRequest {
        writer,
        title,
        content,
    } = body.into_inner();
    state
        .blogs
        .save(NewBlogPost::new(writer, title, content))
        .await?;

    Ok(confirmation("Blog post created."))
}

/// Replace the title and content of a post. The writer is kept.
///
/// PUT /blog/{blog_id}
pub async fn update_blog(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateBlogRequest>,
) -> AppResult<HttpResponse> {
    let UpdateBlogRequest { title, content } = body.into_inner();
    state
        .blogs
        .update(BlogPostUpdate::new(path.into_inner(), title, content))
        .await?;

    Ok(confirmation("Blog post updated."))
}

/// Delete a post together with all of its replies.
///
/// DELETE /blog/{blog_id}
pub async fn delete_blog(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state.blogs.delete_by_id(path.into_inner()).await?;
    Ok(confirmation("Blog post deleted."))
}
