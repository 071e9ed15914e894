use std::time::Duration;

use tokio::sync::watch;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_MAX_ATTEMPTS: u32 = 300;

/// Retry policy for the result poll.
///
/// The reference behavior polled every second forever; the attempt budget
/// bounds that wait so an abandoned opponent cannot hang a session task
/// indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between consecutive polls.
    pub interval: Duration,
    /// Polls attempted before giving up with a timeout.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollPolicy {
            interval: DEFAULT_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PollPolicy {
    /// Reads `DUEL_POLL_INTERVAL_MS` and `DUEL_POLL_MAX_ATTEMPTS` from the
    /// environment, keeping the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut policy = PollPolicy::default();
        if let Some(millis) = env_u64("DUEL_POLL_INTERVAL_MS") {
            policy.interval = Duration::from_millis(millis);
        }
        if let Some(attempts) = env_u64("DUEL_POLL_MAX_ATTEMPTS") {
            policy.max_attempts = attempts.min(u64::from(u32::MAX)) as u32;
        }
        policy
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.trim().parse().ok()
}

/// Creates a linked cancel handle/token pair.
///
/// The handle belongs to whoever owns the session (a UI task, a signal
/// handler); the token is handed to [`crate::services::SessionService::await_result`],
/// which aborts its wait as soon as the handle fires.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Fires the cancellation. Idempotent; tokens that already completed
    /// their wait simply never observe it.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the paired handle fires. If the handle is dropped
    /// without firing, cancellation can no longer happen and this pends
    /// forever; callers race it against their own work in `select!`.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_policy_matches_reference_interval() {
        let policy = PollPolicy::default();

        assert_eq!(policy.interval, Duration::from_secs(1));
        assert_eq!(policy.max_attempts, 300);
    }

    #[tokio::test]
    async fn test_token_observes_cancellation() {
        let (handle, mut token) = cancel_pair();

        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
        token.cancelled().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_never_cancels() {
        let (handle, mut token) = cancel_pair();
        drop(handle);

        tokio::select! {
            _ = token.cancelled() => panic!("a dropped handle must not cancel"),
            _ = tokio::time::sleep(Duration::from_secs(5)) => {}
        }
        assert!(!token.is_cancelled());
    }
}
