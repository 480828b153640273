use thiserror::Error;

/// Every way a backend call or draft conversion can fail.
///
/// The view collapses all of these into a single message via `Display`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("request failed with status {status}")]
    Status { status: u16 },
    #[error("invalid response payload: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("invalid draft: {0}")]
    InvalidDraft(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        match value.status() {
            Some(status) => ClientError::Status {
                status: status.as_u16(),
            },
            None => ClientError::Network(value),
        }
    }
}
