/// Post service - CRUD, ownership checks, comment appends, image attachment
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::db::{PostStore, StoreError};
use crate::error::PostError;
use crate::media::ImageHost;
use crate::middleware::Identity;
use crate::models::{
    Comment, CreateCommentRequest, CreatePostRequest, NewPost, Post, Role, UpdatePostRequest,
};

pub struct PostService {
    posts: Arc<dyn PostStore>,
    images: Arc<dyn ImageHost>,
}

fn internal(e: StoreError) -> PostError {
    tracing::error!(error = %e, "post store failure");
    PostError::Internal
}

/// Mutation rule: the author may, and an admin always may.
fn authorize(post: &Post, identity: Identity) -> Result<(), PostError> {
    if post.author == identity.user_id || identity.role == Role::Admin {
        Ok(())
    } else {
        Err(PostError::Forbidden)
    }
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, images: Arc<dyn ImageHost>) -> Self {
        Self { posts, images }
    }

    pub async fn create(
        &self,
        identity: Identity,
        req: CreatePostRequest,
    ) -> Result<Post, PostError> {
        req.validate()
            .map_err(|e| PostError::InvalidInput(e.to_string()))?;

        let post = self
            .posts
            .insert(NewPost {
                title: req.title,
                content: req.content,
                author: identity.user_id,
            })
            .await
            .map_err(internal)?;

        tracing::info!(post_id = %post.id, author = %post.author, "post created");
        Ok(post)
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, PostError> {
        self.posts
            .find(id)
            .await
            .map_err(internal)?
            .ok_or(PostError::NotFound)
    }

    pub async fn list(&self) -> Result<Vec<Post>, PostError> {
        self.posts.list().await.map_err(internal)
    }

    pub async fn update(
        &self,
        identity: Identity,
        id: Uuid,
        req: UpdatePostRequest,
    ) -> Result<Post, PostError> {
        if matches!(req.title.as_deref(), Some(""))
            || matches!(req.content.as_deref(), Some(""))
        {
            return Err(PostError::InvalidInput(
                "title and content must not be empty".to_string(),
            ));
        }

        let post = self.get(id).await?;
        authorize(&post, identity)?;

        self.posts
            .update_content(id, req.title.as_deref(), req.content.as_deref())
            .await
            .map_err(internal)?
            .ok_or(PostError::NotFound)
    }

    pub async fn delete(&self, identity: Identity, id: Uuid) -> Result<(), PostError> {
        let post = self.get(id).await?;
        authorize(&post, identity)?;

        if self.posts.delete(id).await.map_err(internal)? {
            tracing::info!(post_id = %id, "post deleted");
            Ok(())
        } else {
            Err(PostError::NotFound)
        }
    }

    /// Upload to the external host, then record the returned URL. The store
    /// is only touched after the upload succeeds, so a host failure leaves
    /// the post exactly as it was.
    pub async fn attach_image(
        &self,
        identity: Identity,
        id: Uuid,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Post, PostError> {
        let post = self.get(id).await?;
        authorize(&post, identity)?;

        let image = self.images.upload(file_name, bytes).await.map_err(|e| {
            tracing::warn!(post_id = %id, error = %e, "image upload failed");
            PostError::ImageHost
        })?;

        self.posts
            .set_image(id, &image.url)
            .await
            .map_err(internal)?
            .ok_or(PostError::NotFound)
    }

    /// Append a comment. Any authenticated identity may comment; the store
    /// serializes concurrent appends on the same post.
    pub async fn add_comment(
        &self,
        identity: Identity,
        id: Uuid,
        req: CreateCommentRequest,
    ) -> Result<Post, PostError> {
        req.validate()
            .map_err(|e| PostError::InvalidInput(e.to_string()))?;

        let comment = Comment {
            author: identity.user_id,
            text: req.text,
            created_at: Utc::now(),
        };

        self.posts
            .append_comment(id, comment)
            .await
            .map_err(internal)?
            .ok_or(PostError::NotFound)
    }

    pub async fn comments(&self, id: Uuid) -> Result<Vec<Comment>, PostError> {
        Ok(self.get(id).await?.comments.0)
    }
}
