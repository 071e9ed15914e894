use crate::{backend::BackendError, models::AnswerError};

#[derive(Debug)]
pub enum SessionError {
    /// A player name must be non-empty after trimming.
    EmptyName,
    /// The requested operation is not legal in the session's current stage.
    InvalidStage {
        expected: &'static str,
        actual: &'static str,
    },
    /// The backend paired a match that has nothing to answer.
    EmptyQuestionSet,
    /// Local answer validation failed; nothing was sent upstream.
    Answer(AnswerError),
    /// A backend call failed; the session stage is unchanged.
    Backend(BackendError),
    /// The result poll gave up after exhausting its attempt budget.
    ResultTimeout { attempts: u32 },
    /// The result wait was cancelled through its [`crate::services::CancelToken`].
    Cancelled,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::EmptyName => write!(f, "Player name cannot be empty"),
            SessionError::InvalidStage { expected, actual } => {
                write!(
                    f,
                    "Operation requires stage {}, but the session is in {}",
                    expected, actual
                )
            }
            SessionError::EmptyQuestionSet => write!(f, "Match has an empty question set"),
            SessionError::Answer(err) => write!(f, "Validation error: {}", err),
            SessionError::Backend(err) => write!(f, "Backend error: {}", err),
            SessionError::ResultTimeout { attempts } => {
                write!(f, "No result after {} polls", attempts)
            }
            SessionError::Cancelled => write!(f, "Result wait was cancelled"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<AnswerError> for SessionError {
    fn from(err: AnswerError) -> Self {
        SessionError::Answer(err)
    }
}

impl From<BackendError> for SessionError {
    fn from(err: BackendError) -> Self {
        SessionError::Backend(err)
    }
}
