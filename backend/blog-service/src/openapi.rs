/// OpenAPI documentation aggregation
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::handlers::auth::{LoginResponse, UserProfile};
use crate::models::{
    Comment, CreateCommentRequest, CreatePostRequest, LoginRequest, Post, RegisterRequest, Role,
    UpdatePostRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::auth::me,
        crate::handlers::posts::list_posts,
        crate::handlers::posts::get_post,
        crate::handlers::posts::create_post,
        crate::handlers::posts::update_post,
        crate::handlers::posts::delete_post,
        crate::handlers::posts::attach_image,
        crate::handlers::comments::add_comment,
        crate::handlers::comments::get_post_comments,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        CreatePostRequest,
        UpdatePostRequest,
        CreateCommentRequest,
        UserProfile,
        LoginResponse,
        Post,
        Comment,
        Role,
        ErrorBody,
    )),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Posts", description = "Post CRUD and image attachment"),
        (name = "Comments", description = "Comment appends and reads")
    )
)]
pub struct ApiDoc;
