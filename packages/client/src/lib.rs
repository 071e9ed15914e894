pub mod backend;
pub mod models;
pub mod services;

pub use backend::{BackendError, DuelBackend, HttpBackend};
pub use models::{
    AnswerBuffer, AnswerError, MatchId, MatchResult, Outcome, Profile, Question, Stage,
};
pub use services::{
    cancel_pair, CancelHandle, CancelToken, MatchSearch, PollPolicy, ResultPoll, SessionError,
    SessionService,
};
