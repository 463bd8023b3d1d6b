/// External image host collaborator
///
/// The platform never stores image bytes itself; a post only keeps the URL
/// handed back by the host. One upload call, no retries.
use async_trait::async_trait;
use thiserror::Error;

/// Reference to a hosted image.
#[derive(Debug, Clone)]
pub struct ImageRef {
    pub url: String,
}

#[derive(Debug, Error)]
pub enum ImageHostError {
    #[error("image host request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("image host rejected upload: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<ImageRef, ImageHostError>;
}

/// Talks to an HTTP upload endpoint (Cloudinary-style): one multipart POST,
/// the response carries the hosted URL.
pub struct HttpImageHost {
    http: reqwest::Client,
    upload_url: String,
    api_key: Option<String>,
}

impl HttpImageHost {
    pub fn new(upload_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            upload_url: upload_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl ImageHost for HttpImageHost {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<ImageRef, ImageHostError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self.http.post(&self.upload_url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ImageHostError::Rejected(format!(
                "status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let url = body
            .get("secure_url")
            .or_else(|| body.get("url"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| ImageHostError::Rejected("no url in response".to_string()))?;

        Ok(ImageRef {
            url: url.to_string(),
        })
    }
}
