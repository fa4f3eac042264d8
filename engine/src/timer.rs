use std::time::Duration;

use tokio::task::JoinHandle;

use shared::error::GameError;

/// Single-shot reveal timer.
///
/// Runs `on_elapsed` once after `duration`, on the current tokio runtime.
/// Cancelling (or dropping) the timer aborts the pending task, so the
/// closure never runs for a torn-down session.
pub struct RevealTimer {
    handle: JoinHandle<()>,
}

impl RevealTimer {
    pub fn schedule<F>(duration: Duration, on_elapsed: F) -> Result<Self, GameError>
    where
        F: FnOnce() + Send + 'static,
    {
        if duration.is_zero() {
            return Err(GameError::InvalidDuration);
        }
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            on_elapsed();
        });
        Ok(Self { handle })
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_duration() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_in_timer = fired.clone();
        let _timer = RevealTimer::schedule(Duration::from_secs(3), move || {
            fired_in_timer.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        settle().await;

        tokio::time::advance(Duration::from_millis(2999)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::advance(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_callback() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_in_timer = fired.clone();
        let timer = RevealTimer::schedule(Duration::from_secs(3), move || {
            fired_in_timer.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        settle().await;

        timer.cancel();
        tokio::time::advance(Duration::from_secs(30)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_is_rejected() {
        let result = RevealTimer::schedule(Duration::ZERO, || {});
        assert!(matches!(result, Err(GameError::InvalidDuration)));
    }
}
