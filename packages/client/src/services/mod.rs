pub mod errors;
pub mod poll;
pub mod session_service;

pub use errors::SessionError;
pub use poll::{cancel_pair, CancelHandle, CancelToken, PollPolicy};
pub use session_service::{MatchSearch, ResultPoll, SessionService};
