use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    backend::DuelBackend,
    models::{AnswerBuffer, MatchId, MatchResult, Profile, Question, Stage},
    services::{
        errors::SessionError,
        poll::{CancelToken, PollPolicy},
    },
};

/// Outcome of one matchmaking attempt. `Waiting` is a normal result, not a
/// failure: the opponent pool simply had nothing to offer yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSearch {
    Paired,
    Waiting,
}

/// Outcome of one result poll while the session is `Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultPoll {
    Ready(MatchResult),
    NotReady,
}

/// Drives one play session through its five stages.
///
/// This is the only place session state transitions happen; the backend
/// returns plain data and never touches the stage. Calls are issued strictly
/// sequentially, so one instance needs no internal locking. Each session gets
/// its own instance; instances share nothing but the backend handle.
///
/// Every method that talks to the backend raises the loading flag for the
/// duration of the call and clears it on completion or failure, and a failed
/// call leaves the stage exactly as it was.
pub struct SessionService {
    backend: Arc<dyn DuelBackend>,
    stage: Stage,
    loading: bool,
    poll: PollPolicy,
}

impl SessionService {
    pub fn new(backend: Arc<dyn DuelBackend>) -> Self {
        Self::with_policy(backend, PollPolicy::default())
    }

    pub fn with_policy(backend: Arc<dyn DuelBackend>, poll: PollPolicy) -> Self {
        SessionService {
            backend,
            stage: Stage::LoggedOut,
            loading: false,
            poll,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// True while a backend call issued by this session is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn profile(&self) -> Option<&Profile> {
        match &self.stage {
            Stage::Authenticated(profile) | Stage::Resolved { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn questions(&self) -> Option<&[Question]> {
        match &self.stage {
            Stage::Matched { questions, .. } => Some(questions),
            _ => None,
        }
    }

    pub fn answers(&self) -> Option<&AnswerBuffer> {
        match &self.stage {
            Stage::Matched { answers, .. } => Some(answers),
            _ => None,
        }
    }

    /// Authenticates and fetches the player's profile, landing in
    /// `Authenticated`. Legal from `LoggedOut`, and from `Authenticated`
    /// for an idempotent identity overwrite.
    pub async fn login(&mut self, name: &str) -> Result<(), SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        match self.stage {
            Stage::LoggedOut | Stage::Authenticated(_) => {}
            _ => return Err(self.invalid_stage("LoggedOut")),
        }

        self.loading = true;
        let fetched = self.login_and_fetch_profile(name).await;
        self.loading = false;

        let profile = fetched?;
        info!("logged in as {}", profile.name);
        self.stage = Stage::Authenticated(profile);
        Ok(())
    }

    async fn login_and_fetch_profile(&self, name: &str) -> Result<Profile, SessionError> {
        self.backend.login(name).await?;
        Ok(self.backend.get_profile().await?)
    }

    /// Asks the matchmaking pool for an opponent. On a pairing, the question
    /// set is fetched in the same step and an empty answer buffer is seeded;
    /// on `Waiting` the stage is untouched and the caller may simply ask
    /// again. Legal from `Authenticated`.
    pub async fn find_match(&mut self) -> Result<MatchSearch, SessionError> {
        if !matches!(self.stage, Stage::Authenticated(_)) {
            return Err(self.invalid_stage("Authenticated"));
        }

        self.loading = true;
        let acquired = self.acquire_match().await;
        self.loading = false;

        match acquired? {
            Some((match_id, questions)) => {
                let answers = AnswerBuffer::new(questions.len());
                info!(
                    "paired into match {} with {} questions",
                    match_id,
                    questions.len()
                );
                self.stage = Stage::Matched {
                    match_id,
                    questions,
                    answers,
                };
                Ok(MatchSearch::Paired)
            }
            None => {
                debug!("no opponent available yet");
                Ok(MatchSearch::Waiting)
            }
        }
    }

    // A match without its questions is not a valid session state, so a
    // failed or empty question fetch fails the whole acquisition.
    async fn acquire_match(&self) -> Result<Option<(MatchId, Vec<Question>)>, SessionError> {
        let Some(match_id) = self.backend.find_match().await? else {
            return Ok(None);
        };
        let questions = self.backend.get_questions(&match_id).await?;
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }
        Ok(Some((match_id, questions)))
    }

    /// Records the player's raw input for one question. Purely local; legal
    /// only in `Matched`, and only for an in-range index.
    pub fn set_answer(&mut self, index: usize, value: &str) -> Result<(), SessionError> {
        match &mut self.stage {
            Stage::Matched { answers, .. } => {
                answers.set(index, value)?;
                Ok(())
            }
            _ => Err(self.invalid_stage("Matched")),
        }
    }

    /// Validates the whole answer buffer locally and, only if every slot
    /// holds an integer, sends it once. Validation failures never reach the
    /// backend. Legal from `Matched`; lands in `Submitted`.
    pub async fn submit(&mut self) -> Result<(), SessionError> {
        let (match_id, parsed) = match &self.stage {
            Stage::Matched {
                match_id, answers, ..
            } => (match_id.clone(), answers.parsed()?),
            _ => return Err(self.invalid_stage("Matched")),
        };

        self.loading = true;
        let sent = self.backend.submit_answers(&match_id, &parsed).await;
        self.loading = false;

        sent?;
        info!("submitted {} answers for match {}", parsed.len(), match_id);
        self.stage = Stage::Submitted { match_id };
        Ok(())
    }

    /// Issues exactly one result poll. `NotReady` leaves the stage at
    /// `Submitted`; a present result refreshes the profile in the same step
    /// and lands in `Resolved`. Legal from `Submitted`.
    pub async fn poll_result(&mut self) -> Result<ResultPoll, SessionError> {
        let match_id = match &self.stage {
            Stage::Submitted { match_id } => match_id.clone(),
            _ => return Err(self.invalid_stage("Submitted")),
        };

        self.loading = true;
        let polled = self.resolve(&match_id).await;
        self.loading = false;

        match polled? {
            Some((profile, result)) => {
                info!(
                    "match {} resolved: {} vs {} ({})",
                    match_id,
                    result.own_score,
                    result.opponent_score,
                    result.outcome()
                );
                self.stage = Stage::Resolved { profile, result };
                Ok(ResultPoll::Ready(result))
            }
            None => Ok(ResultPoll::NotReady),
        }
    }

    // The result changes the player's stats, so the profile is re-fetched in
    // the same logical step. If that fetch fails the stage stays `Submitted`
    // and the next poll retries both.
    async fn resolve(
        &self,
        match_id: &MatchId,
    ) -> Result<Option<(Profile, MatchResult)>, SessionError> {
        let Some(result) = self.backend.get_result(match_id).await? else {
            return Ok(None);
        };
        let profile = self.backend.get_profile().await?;
        Ok(Some((profile, result)))
    }

    /// Polls until the result is present, sleeping [`PollPolicy::interval`]
    /// between attempts. Gives up after [`PollPolicy::max_attempts`] polls
    /// and aborts early when `cancel` fires; both leave the stage at
    /// `Submitted` so the wait can be resumed or abandoned explicitly.
    pub async fn await_result(&mut self, cancel: &CancelToken) -> Result<MatchResult, SessionError> {
        let mut cancel = cancel.clone();
        for attempt in 1..=self.poll.max_attempts {
            if cancel.is_cancelled() {
                return Err(SessionError::Cancelled);
            }
            match self.poll_result().await? {
                ResultPoll::Ready(result) => return Ok(result),
                ResultPoll::NotReady => {
                    debug!(
                        "result not ready (attempt {}/{})",
                        attempt, self.poll.max_attempts
                    );
                }
            }
            tokio::select! {
                _ = cancel.cancelled() => return Err(SessionError::Cancelled),
                _ = tokio::time::sleep(self.poll.interval) => {}
            }
        }
        warn!(
            "gave up waiting for a result after {} polls",
            self.poll.max_attempts
        );
        Err(SessionError::ResultTimeout {
            attempts: self.poll.max_attempts,
        })
    }

    /// Starts a new round: discards the match, questions, answers, and
    /// result, landing in `Authenticated` with the already-refreshed profile.
    /// Legal only from `Resolved`; no backend call is involved.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        match std::mem::replace(&mut self.stage, Stage::LoggedOut) {
            Stage::Resolved { profile, .. } => {
                info!("starting a new round for {}", profile.name);
                self.stage = Stage::Authenticated(profile);
                Ok(())
            }
            other => {
                let err = SessionError::InvalidStage {
                    expected: "Resolved",
                    actual: other.name(),
                };
                self.stage = other;
                Err(err)
            }
        }
    }

    fn invalid_stage(&self, expected: &'static str) -> SessionError {
        SessionError::InvalidStage {
            expected,
            actual: self.stage.name(),
        }
    }
}
