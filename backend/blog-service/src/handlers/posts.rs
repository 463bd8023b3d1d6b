/// Post handlers - HTTP endpoints for post operations
use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::{ErrorBody, PostError};
use crate::middleware::Identity;
use crate::models::{CreatePostRequest, Post, UpdatePostRequest};
use crate::services::PostService;
use crate::AppState;

fn service(state: &AppState) -> PostService {
    PostService::new(state.posts.clone(), state.images.clone())
}

/// Multipart body for image attachment: a single `file` field.
#[derive(Debug, MultipartForm)]
pub struct ImageUploadForm {
    #[multipart(limit = "8MB")]
    pub file: Bytes,
}

/// List all posts
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "Posts",
    responses(
        (status = 200, description = "All posts", body = [Post])
    )
)]
pub async fn list_posts(state: web::Data<AppState>) -> Result<HttpResponse, PostError> {
    let posts = service(&state).list().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Get a post by ID
#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}",
    tag = "Posts",
    params(("post_id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "The post", body = Post),
        (status = 404, description = "Unknown post", body = ErrorBody)
    )
)]
pub async fn get_post(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse, PostError> {
    let post = service(&state).get(*post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Create a new post
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "Posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, PostError> {
    let post = service(&state).create(identity, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

/// Update a post's title/content (owner or admin only)
#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}",
    tag = "Posts",
    params(("post_id" = Uuid, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated post", body = Post),
        (status = 403, description = "Not the author", body = ErrorBody),
        (status = 404, description = "Unknown post", body = ErrorBody)
    )
)]
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    post_id: web::Path<Uuid>,
    payload: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, PostError> {
    let post = service(&state)
        .update(identity, *post_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post and its comments (owner or admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}",
    tag = "Posts",
    params(("post_id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 403, description = "Not the author", body = ErrorBody),
        (status = 404, description = "Unknown post", body = ErrorBody)
    )
)]
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse, PostError> {
    service(&state).delete(identity, *post_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Attach an image to a post (owner or admin only)
///
/// The file is pushed to the external image host; the post stores only the
/// returned URL.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{post_id}/image",
    tag = "Posts",
    params(("post_id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post with image attached", body = Post),
        (status = 403, description = "Not the author", body = ErrorBody),
        (status = 404, description = "Unknown post", body = ErrorBody),
        (status = 502, description = "Image host failure", body = ErrorBody)
    )
)]
pub async fn attach_image(
    state: web::Data<AppState>,
    identity: Identity,
    post_id: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<ImageUploadForm>,
) -> Result<HttpResponse, PostError> {
    let file_name = form
        .file
        .file_name
        .clone()
        .unwrap_or_else(|| "upload".to_string());
    let bytes = form.file.data.to_vec();

    let post = service(&state)
        .attach_image(identity, *post_id, &file_name, bytes)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}
