/// Typed client facade for the blog service
///
/// Translates application actions into HTTP calls against the service's
/// `/api/v1` surface. The client is cheap to clone per request style; attach
/// a bearer token with [`BlogClient::with_token`] after login.
pub mod error;
pub mod types;

use serde_json::json;
use uuid::Uuid;

pub use error::ClientError;
pub use types::{CommentView, LoginGrant, PostView, UserProfile};

#[derive(Debug, Clone)]
pub struct BlogClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl BlogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
            token: None,
        }
    }

    /// Attach the bearer token returned by [`BlogClient::login`].
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn expect_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }
        Ok(response.json::<T>().await?)
    }

    async fn expect_empty(response: reqwest::Response) -> Result<(), ClientError> {
        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }
        Ok(())
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, ClientError> {
        let response = self
            .http
            .post(self.url("/api/v1/auth/register"))
            .json(&json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    /// Log in with a username or email.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginGrant, ClientError> {
        let response = self
            .http
            .post(self.url("/api/v1/auth/login"))
            .json(&json!({
                "identifier": identifier,
                "password": password,
            }))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        let response = self
            .authorize(self.http.get(self.url("/api/v1/auth/me")))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn posts(&self) -> Result<Vec<PostView>, ClientError> {
        let response = self.http.get(self.url("/api/v1/posts")).send().await?;
        Self::expect_json(response).await
    }

    pub async fn post(&self, post_id: Uuid) -> Result<PostView, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/api/v1/posts/{post_id}")))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn create_post(&self, title: &str, content: &str) -> Result<PostView, ClientError> {
        let response = self
            .authorize(self.http.post(self.url("/api/v1/posts")))
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    /// Update title and/or content. `None` leaves a field untouched.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<PostView, ClientError> {
        let response = self
            .authorize(self.http.put(self.url(&format!("/api/v1/posts/{post_id}"))))
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn delete_post(&self, post_id: Uuid) -> Result<(), ClientError> {
        let response = self
            .authorize(
                self.http
                    .delete(self.url(&format!("/api/v1/posts/{post_id}"))),
            )
            .send()
            .await?;
        Self::expect_empty(response).await
    }

    pub async fn attach_image(
        &self,
        post_id: Uuid,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<PostView, ClientError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .authorize(
                self.http
                    .post(self.url(&format!("/api/v1/posts/{post_id}/image"))),
            )
            .multipart(form)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn add_comment(&self, post_id: Uuid, text: &str) -> Result<PostView, ClientError> {
        let response = self
            .authorize(
                self.http
                    .post(self.url(&format!("/api/v1/posts/{post_id}/comments"))),
            )
            .json(&json!({ "text": text }))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn comments(&self, post_id: Uuid) -> Result<Vec<CommentView>, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/api/v1/posts/{post_id}/comments")))
            .send()
            .await?;
        Self::expect_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = BlogClient::new("http://localhost:8080/");
        assert_eq!(client.url("/api/v1/posts"), "http://localhost:8080/api/v1/posts");
    }

    #[test]
    fn test_error_body_parsing() {
        let body: error::ApiErrorBody =
            serde_json::from_str(r#"{"error":"post not found","status":404}"#).unwrap();
        assert_eq!(body.error, "post not found");
        assert_eq!(body.status, 404);
    }
}
