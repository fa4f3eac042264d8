use std::fmt;

/// Errors raised by the reveal mechanics.
///
/// Everything except `Cancelled` indicates a broken caller contract and is
/// reported immediately, never retried. `Cancelled` is the silent outcome of
/// tearing down a session while its reveal timer is pending.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    EmptyPool,
    InvalidRepeatCount(u32),
    InvalidSourcePrice(f64),
    InvalidTargetPrice(f64),
    InvalidMultiplier(f64),
    InvalidChance(f64),
    InvalidLayout,
    InvalidDuration,
    SpinInProgress,
    MissingCallback,
    Cancelled,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EmptyPool => write!(f, "reward pool is empty"),
            GameError::InvalidRepeatCount(n) => {
                write!(f, "reveal sequence repeat count must be positive, got {}", n)
            }
            GameError::InvalidSourcePrice(p) => {
                write!(f, "source price must be a non-negative number, got {}", p)
            }
            GameError::InvalidTargetPrice(p) => {
                write!(f, "target price must be a positive number, got {}", p)
            }
            GameError::InvalidMultiplier(m) => {
                write!(f, "upgrade multiplier must be a positive number, got {}", m)
            }
            GameError::InvalidChance(c) => {
                write!(f, "chance must be within 0..=100, got {}", c)
            }
            GameError::InvalidLayout => write!(f, "strip layout dimensions must be positive"),
            GameError::InvalidDuration => write!(f, "reveal duration must be positive"),
            GameError::SpinInProgress => write!(f, "a spin is already in progress"),
            GameError::MissingCallback => {
                write!(f, "no completion callback registered before start")
            }
            GameError::Cancelled => write!(f, "spin was cancelled before its reveal"),
        }
    }
}

impl std::error::Error for GameError {}
