use serde::{Serialize, Deserialize};

use crate::error::GameError;

/// Phase of a reveal cycle. A session moves `Idle -> Spinning -> Revealed`
/// and can be re-armed from `Revealed` for a repeat run.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning,
    Revealed,
}

/// Transient state of one draw-and-reveal cycle.
///
/// The outcome is captured when the spin starts; `Revealed` only marks the
/// moment the render layer is allowed to see it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpinSession<T> {
    pub phase: SpinPhase,
    pub result: Option<T>,
}

impl<T> SpinSession<T> {
    pub fn new() -> Self {
        Self {
            phase: SpinPhase::Idle,
            result: None,
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    /// Begins a spin, capturing the already-computed outcome. Starting while
    /// a spin is in flight is rejected and leaves the session untouched.
    pub fn start_spin(&mut self, result: T) -> Result<(), GameError> {
        if self.phase == SpinPhase::Spinning {
            return Err(GameError::SpinInProgress);
        }
        self.phase = SpinPhase::Spinning;
        self.result = Some(result);
        Ok(())
    }

    /// Marks the captured outcome as disclosed. Returns it only on the
    /// `Spinning -> Revealed` transition, so disclosure happens at most once
    /// per `start_spin`.
    pub fn complete_spin(&mut self) -> Option<&T> {
        if self.phase != SpinPhase::Spinning {
            return None;
        }
        self.phase = SpinPhase::Revealed;
        self.result.as_ref()
    }

    /// Discards the session outcome and returns to `Idle`.
    pub fn reset(&mut self) {
        self.phase = SpinPhase::Idle;
        self.result = None;
    }
}

impl<T> Default for SpinSession<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut session: SpinSession<u32> = SpinSession::new();
        assert_eq!(session.phase, SpinPhase::Idle);

        session.start_spin(7).unwrap();
        assert!(session.is_spinning());
        assert_eq!(session.result, Some(7));

        assert_eq!(session.complete_spin(), Some(&7));
        assert_eq!(session.phase, SpinPhase::Revealed);

        // Re-arming from Revealed starts a fresh draw.
        session.start_spin(9).unwrap();
        assert_eq!(session.result, Some(9));
    }

    #[test]
    fn test_start_while_spinning_is_rejected() {
        let mut session: SpinSession<u32> = SpinSession::new();
        session.start_spin(1).unwrap();
        assert_eq!(session.start_spin(2), Err(GameError::SpinInProgress));
        // The in-flight outcome is not overwritten.
        assert_eq!(session.result, Some(1));
    }

    #[test]
    fn test_complete_spin_discloses_at_most_once() {
        let mut session: SpinSession<u32> = SpinSession::new();
        session.start_spin(3).unwrap();
        assert!(session.complete_spin().is_some());
        assert!(session.complete_spin().is_none());
    }

    #[test]
    fn test_reset_discards_outcome() {
        let mut session: SpinSession<u32> = SpinSession::new();
        session.start_spin(5).unwrap();
        session.complete_spin();
        session.reset();
        assert_eq!(session.phase, SpinPhase::Idle);
        assert_eq!(session.result, None);
    }
}
