/// In-memory stores
///
/// Back the integration tests and local runs without Postgres. Uniqueness
/// checks and comment appends run inside one write-lock critical section, so
/// they are atomic exactly where the Postgres statements are.
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::{PostStore, StoreError, UserStore};
use crate::models::{Comment, NewPost, NewUser, Post, Role, User};

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.username == new.username || u.email == new.email)
        {
            return Err(StoreError::Duplicate);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            role: Role::User,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username == identifier || u.email == identifier)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPostStore {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn insert(&self, new: NewPost) -> Result<Post, StoreError> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: new.title,
            content: new.content,
            author: new.author,
            image_url: None,
            comments: Json(Vec::new()),
            created_at: now,
            updated_at: now,
        };

        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().await;
        let mut all: Vec<Post> = posts.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn update_content(
        &self,
        id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Post>, StoreError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = title {
            post.title = title.to_string();
        }
        if let Some(content) = content {
            post.content = content.to_string();
        }
        post.updated_at = Utc::now();

        Ok(Some(post.clone()))
    }

    async fn set_image(&self, id: Uuid, image_url: &str) -> Result<Option<Post>, StoreError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.get_mut(&id) else {
            return Ok(None);
        };

        post.image_url = Some(image_url.to_string());
        post.updated_at = Utc::now();

        Ok(Some(post.clone()))
    }

    async fn append_comment(&self, id: Uuid, comment: Comment) -> Result<Option<Post>, StoreError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.get_mut(&id) else {
            return Ok(None);
        };

        post.comments.0.push(comment);
        post.updated_at = Utc::now();

        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.posts.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_uniqueness() {
        let store = MemoryUserStore::new();
        let new = |username: &str, email: &str| NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        };

        store.insert(new("alice", "alice@x.com")).await.unwrap();

        assert!(matches!(
            store.insert(new("alice", "other@x.com")).await,
            Err(StoreError::Duplicate)
        ));
        assert!(matches!(
            store.insert(new("other", "alice@x.com")).await,
            Err(StoreError::Duplicate)
        ));
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = MemoryPostStore::new();
        let post = store
            .insert(NewPost {
                title: "t".to_string(),
                content: "c".to_string(),
                author: Uuid::new_v4(),
            })
            .await
            .unwrap();

        for i in 0..3 {
            store
                .append_comment(
                    post.id,
                    Comment {
                        author: Uuid::new_v4(),
                        text: format!("comment {i}"),
                        created_at: Utc::now(),
                    },
                )
                .await
                .unwrap();
        }

        let post = store.find(post.id).await.unwrap().unwrap();
        let texts: Vec<&str> = post.comments.0.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["comment 0", "comment 1", "comment 2"]);
    }
}
