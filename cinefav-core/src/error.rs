use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CinefavError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Controller detached: result of in-flight operation discarded")]
    Detached,
}

impl CinefavError {
    /// Map a non-success HTTP status and its body into an error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == 404 {
            CinefavError::NotFound(message)
        } else {
            CinefavError::Upstream { status, message }
        }
    }
}

pub type Result<T> = std::result::Result<T, CinefavError>;
