use serde::Deserialize;
use thiserror::Error;

/// Error body the service returns for every failure.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub status: u16,
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with an error status.
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced an answer.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => "unknown error".to_string(),
        };
        ClientError::Api { status, message }
    }
}
