use thiserror::Error;

/// Why a session did not reach the upload stage
#[derive(Debug, Error)]
pub enum SessionError {
    /// A bounded status poll ran out of attempts
    #[error("timed out waiting for {condition}")]
    Timeout { condition: &'static str },

    #[error(transparent)]
    Remote(#[from] anyhow::Error),
}

impl SessionError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SessionError::Timeout { .. })
    }
}
