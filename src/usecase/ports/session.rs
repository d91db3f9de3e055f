use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionStoreError {
    #[error("{0}")]
    Message(String),
}

impl From<anyhow::Error> for SessionStoreError {
    fn from(err: anyhow::Error) -> Self {
        SessionStoreError::Message(format!("{err:#}"))
    }
}

/// Where the signed-in token survives between launches.
pub trait SessionStore: Send + Sync {
    fn load_token(&self) -> Result<Option<String>, SessionStoreError>;
    fn save_token(&self, token: &str) -> Result<(), SessionStoreError>;
    fn clear_token(&self) -> Result<(), SessionStoreError>;
}

/// Supplies the bearer token attached to outgoing API requests.
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}
