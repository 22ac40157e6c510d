//! Per-action status for interactive front ends.

use std::future::Future;

use crate::error::ActionError;

/// Where a user action stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActionState<T> {
    #[default]
    Idle,
    Submitting,
    Succeeded(T),
    /// Holds the user-facing message.
    Failed(String),
}

impl<T> ActionState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Succeeded(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Tracks one action: refuses a second submission while one is in flight and
/// clears the previous outcome when a new attempt starts.
#[derive(Debug, Default)]
pub struct ActionSlot<T> {
    state: ActionState<T>,
}

impl<T> ActionSlot<T> {
    pub fn new() -> Self {
        Self {
            state: ActionState::Idle,
        }
    }

    pub fn state(&self) -> &ActionState<T> {
        &self.state
    }

    /// Enter `Submitting`. Fails if an attempt is already in flight.
    pub fn begin(&mut self) -> Result<(), ActionError> {
        if self.state.is_loading() {
            return Err(ActionError::AlreadySubmitting);
        }
        self.state = ActionState::Submitting;
        Ok(())
    }

    /// Record the outcome of the attempt started by [`ActionSlot::begin`].
    pub fn finish(&mut self, outcome: Result<T, ActionError>) -> &ActionState<T> {
        self.state = match outcome {
            Ok(value) => ActionState::Succeeded(value),
            Err(e) => {
                tracing::debug!(error = %e, "action failed");
                ActionState::Failed(e.user_message())
            }
        };
        &self.state
    }

    /// Run `action` through `begin` and `finish`.
    pub async fn run<F>(&mut self, action: F) -> &ActionState<T>
    where
        F: Future<Output = Result<T, ActionError>>,
    {
        if let Err(e) = self.begin() {
            tracing::debug!(error = %e, "ignoring duplicate submission");
            return &self.state;
        }
        let outcome = action.await;
        self.finish(outcome)
    }

    /// Back to `Idle`, dropping any outcome.
    pub fn reset(&mut self) {
        self.state = ActionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn success_then_reset() {
        let mut slot = ActionSlot::new();
        let state = slot.run(async { Ok::<_, ActionError>(7u32) }).await;
        assert_eq!(state.success(), Some(&7));
        slot.reset();
        assert_eq!(slot.state(), &ActionState::Idle);
    }

    #[tokio::test]
    async fn failure_records_user_message() {
        let mut slot: ActionSlot<u32> = ActionSlot::new();
        let state = slot
            .run(async { Err(ActionError::WalletNotConnected) })
            .await;
        assert_eq!(state.error(), Some("Please connect your wallet first"));
    }

    #[test]
    fn second_begin_is_refused_while_submitting() {
        let mut slot: ActionSlot<()> = ActionSlot::new();
        slot.begin().unwrap();
        assert!(slot.state().is_loading());
        assert!(matches!(slot.begin(), Err(ActionError::AlreadySubmitting)));
        slot.finish(Ok(()));
        assert!(slot.begin().is_ok());
    }

    #[tokio::test]
    async fn new_attempt_clears_previous_error() {
        let mut slot: ActionSlot<u32> = ActionSlot::new();
        slot.run(async { Err(ActionError::SigningRejected) }).await;
        assert!(slot.state().error().is_some());
        slot.begin().unwrap();
        assert_eq!(slot.state().error(), None);
    }
}
