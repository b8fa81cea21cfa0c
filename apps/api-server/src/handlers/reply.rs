//! Reply endpoints.

use actix_web::{HttpResponse, web};
use quill_core::domain::{NewReply, ReplyUpdate};
use quill_shared::dto::{CreateReplyRequest, UpdateReplyRequest};

use super::confirmation;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Replies of one post, oldest first. Unknown posts yield an empty list.
///
/// GET /reply/{blog_id}/all
pub async fn list_replies(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let replies = state.replies.find_all_by_blog_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(replies))
}

/// GET /reply/{reply_id}
pub async fn get_reply(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let reply = state
        .replies
        .find_by_reply_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Reply not found.".to_string()))?;

    Ok(HttpResponse::Ok().json(reply))
}

/// Attach a reply to an existing post.
///
/// POST /reply
pub async fn create_reply(
    state: web::Data<AppState>,
    body: web::Json<CreateReplyRequest>,
) -> AppResult<HttpResponse> {
    let CreateReplyRequest {
        blog_id,
        reply_writer,
        reply_content,
    } = body.into_inner();
    let reply = state
        .replies
        .save(NewReply::new(blog_id, reply_writer, reply_content))
        .await?;

    tracing::debug!(reply_id = reply.reply_id, blog_id, "Reply stored");
    Ok(confirmation("Reply created."))
}

/// PUT /reply/{reply_id}
pub async fn update_reply(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateReplyRequest>,
) -> AppResult<HttpResponse> {
    let UpdateReplyRequest {
        reply_writer,
        reply_content,
    } = body.into_inner();
    state
        .replies
        .update(ReplyUpdate::new(path.into_inner(), reply_writer, reply_content))
        .await?;

    Ok(confirmation("Reply updated."))
}

/// Deleting an unknown reply still succeeds.
///
/// DELETE /reply/{reply_id}
pub async fn delete_reply(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state.replies.delete_by_reply_id(path.into_inner()).await?;
    Ok(confirmation("Reply deleted."))
}
