/// Comment handlers - append and fetch a post's comment sequence
use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::{ErrorBody, PostError};
use crate::middleware::Identity;
use crate::models::{Comment, CreateCommentRequest, Post};
use crate::services::PostService;
use crate::AppState;

fn service(state: &AppState) -> PostService {
    PostService::new(state.posts.clone(), state.images.clone())
}

/// Append a comment to a post
///
/// Any authenticated identity may comment; ownership is not checked.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{post_id}/comments",
    tag = "Comments",
    params(("post_id" = Uuid, Path, description = "Post ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Post with the comment appended", body = Post),
        (status = 400, description = "Empty comment", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Unknown post", body = ErrorBody)
    )
)]
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    post_id: web::Path<Uuid>,
    payload: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, PostError> {
    let post = service(&state)
        .add_comment(identity, *post_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(post))
}

/// Get a post's comments in display order
#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}/comments",
    tag = "Comments",
    params(("post_id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Comments in insertion order", body = [Comment]),
        (status = 404, description = "Unknown post", body = ErrorBody)
    )
)]
pub async fn get_post_comments(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse, PostError> {
    let comments = service(&state).comments(*post_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}
