#[derive(Debug)]
pub enum BackendError {
    /// The call never completed (connection, DNS, timeout).
    Transport(String),
    /// The backend answered with a non-success HTTP status.
    Status(u16),
    /// The response body did not match the expected shape.
    Serialization(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Transport(msg) => write!(f, "Transport error: {}", msg),
            BackendError::Status(code) => write!(f, "Backend responded with status {}", code),
            BackendError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Serialization(err.to_string())
        } else if let Some(status) = err.status() {
            BackendError::Status(status.as_u16())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}
