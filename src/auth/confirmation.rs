//! Rendezvous between a `/sign_up` request waiting for its confirmation code
//! and the `/sign_up/checkmail` request that delivers it.
//!
//! Each registration attempt owns one entry keyed by the registrant email.
//! The waiting side holds a [`PendingConfirmation`]; dropping it (completion,
//! timeout or client disconnect) evicts the entry, but only if the entry still
//! belongs to the same attempt.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::Rng;
use tokio::sync::oneshot;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ConfirmationError {
    #[error("a registration for {0} is already waiting for its confirmation code")]
    AlreadyPending(String),
    #[error("no registration is waiting for a confirmation code")]
    NothingPending,
    #[error("several registrations are waiting, the email the code belongs to is required")]
    Ambiguous,
    #[error("confirmation code was not received within {0:?}")]
    TimedOut(Duration),
    #[error("confirmation attempt was cancelled")]
    Cancelled,
}

/// Four decimal digits, `1000..=9999`.
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(1000..=9999).to_string()
}

struct PendingAttempt {
    attempt_id: Uuid,
    sender: oneshot::Sender<String>,
}

#[derive(Clone, Default)]
pub struct ConfirmationRegistry {
    pending: Arc<DashMap<String, PendingAttempt>>,
}

impl ConfirmationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new attempt for `email`. A second attempt for the same
    /// email is refused while the first one is still waiting.
    pub fn open(&self, email: &str) -> Result<PendingConfirmation, ConfirmationError> {
        let key = email.trim().to_string();
        let attempt_id = Uuid::new_v4();
        let (sender, receiver) = oneshot::channel();
        let attempt = PendingAttempt { attempt_id, sender };

        match self.pending.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                // A closed sender means the waiter is gone but its guard has not run yet.
                if !occupied.get().sender.is_closed() {
                    return Err(ConfirmationError::AlreadyPending(key));
                }
                occupied.insert(attempt);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(attempt);
            }
        }

        tracing::debug!(email = %key, %attempt_id, pending = self.pending_count(), "Confirmation attempt opened");

        Ok(PendingConfirmation {
            registry: self.clone(),
            email: key,
            attempt_id,
            receiver: Some(receiver),
        })
    }

    /// Hands `code` to the attempt waiting for `email`, or to the only
    /// waiting attempt when no email is given. Returns the resolved email.
    pub fn submit(&self, email: Option<&str>, code: &str) -> Result<String, ConfirmationError> {
        let key = match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) => email.to_string(),
            None => self.sole_pending_email()?,
        };

        let (_, attempt) = self
            .pending
            .remove(&key)
            .ok_or(ConfirmationError::NothingPending)?;

        attempt
            .sender
            .send(code.to_string())
            .map_err(|_| ConfirmationError::NothingPending)?;

        tracing::debug!(email = %key, attempt_id = %attempt.attempt_id, "Confirmation code delivered");
        Ok(key)
    }

    fn sole_pending_email(&self) -> Result<String, ConfirmationError> {
        let keys: Vec<String> = self
            .pending
            .iter()
            .take(2)
            .map(|entry| entry.key().clone())
            .collect();

        match keys.as_slice() {
            [] => Err(ConfirmationError::NothingPending),
            [only] => Ok(only.clone()),
            _ => Err(ConfirmationError::Ambiguous),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn evict(&self, email: &str, attempt_id: Uuid) {
        if self
            .pending
            .remove_if(email, |_, attempt| attempt.attempt_id == attempt_id)
            .is_some()
        {
            tracing::debug!(%email, %attempt_id, "Confirmation attempt evicted");
        }
    }
}

/// The waiting half of one registration attempt.
pub struct PendingConfirmation {
    registry: ConfirmationRegistry,
    email: String,
    attempt_id: Uuid,
    receiver: Option<oneshot::Receiver<String>>,
}

impl PendingConfirmation {
    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Waits at most `timeout` for the code.
    pub async fn wait(mut self, timeout: Duration) -> Result<String, ConfirmationError> {
        let receiver = self.receiver.take().ok_or(ConfirmationError::Cancelled)?;

        match tokio::time::timeout(timeout, receiver).await {
            Ok(Ok(code)) => Ok(code),
            Ok(Err(_)) => Err(ConfirmationError::Cancelled),
            Err(_) => Err(ConfirmationError::TimedOut(timeout)),
        }
    }
}

impl Drop for PendingConfirmation {
    fn drop(&mut self) {
        self.registry.evict(&self.email, self.attempt_id);
    }
}
