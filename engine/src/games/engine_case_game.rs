use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use rand::Rng;
use time::OffsetDateTime;
use uuid::Uuid;

use shared::error::GameError;
use shared::item::Item;
use shared::session::{SpinPhase, SpinSession};
use shared::shared_case_game::{
    build_reveal_sequence, compute_landing_offset, select_reward, CaseOutcome,
};

use crate::config::EngineConfig;
use crate::timer::RevealTimer;

type CompletionCallback = Arc<dyn Fn(&CaseOutcome) + Send + Sync>;

/// One case-opening instance: a pool, a strip layout, and at most one spin
/// in flight.
///
/// The winning item and landing offset are drawn synchronously in
/// [`CaseOpening::start`]; the reveal timer only delays handing them to the
/// completion callback. Instances are independent, so several modals can
/// spin concurrently.
pub struct CaseOpening {
    pool: Vec<Item>,
    item_width: f64,
    viewport_width: f64,
    config: EngineConfig,
    session: Arc<Mutex<SpinSession<CaseOutcome>>>,
    // Bumped on every start and dispose; a pending timer whose generation
    // no longer matches must not disclose anything.
    generation: Arc<AtomicU64>,
    on_complete: Option<CompletionCallback>,
    timer: Option<RevealTimer>,
}

impl CaseOpening {
    pub fn new(
        pool: Vec<Item>,
        item_width: f64,
        viewport_width: f64,
        config: EngineConfig,
    ) -> Result<Self, GameError> {
        if pool.is_empty() {
            return Err(GameError::EmptyPool);
        }
        if !(item_width > 0.0) || !(viewport_width > 0.0) {
            return Err(GameError::InvalidLayout);
        }
        Ok(Self {
            pool,
            item_width,
            viewport_width,
            config: config.validated()?,
            session: Arc::new(Mutex::new(SpinSession::new())),
            generation: Arc::new(AtomicU64::new(0)),
            on_complete: None,
            timer: None,
        })
    }

    /// Registers the sink the captured outcome is disclosed to. Must be set
    /// before the first [`CaseOpening::start`]. The callback must not call
    /// back into this instance.
    pub fn on_complete<F>(&mut self, callback: F)
    where
        F: Fn(&CaseOutcome) + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(callback));
    }

    pub fn phase(&self) -> SpinPhase {
        self.session.lock().unwrap().phase
    }

    pub fn last_result(&self) -> Option<CaseOutcome> {
        self.session.lock().unwrap().result.clone()
    }

    /// The strip the render layer scrolls while this case spins. Has no
    /// bearing on which item wins.
    pub fn reveal_sequence(&self) -> Result<Vec<Item>, GameError> {
        build_reveal_sequence(&self.pool, self.config.repeat_count)
    }

    /// Draws the winning item, captures it in the session together with the
    /// jittered landing offset, and schedules the single disclosure.
    pub fn start(&mut self, rng: &mut impl Rng) -> Result<(), GameError> {
        let on_complete = self
            .on_complete
            .clone()
            .ok_or(GameError::MissingCallback)?;

        let outcome = {
            let mut session = self.session.lock().unwrap();
            if session.is_spinning() {
                return Err(GameError::SpinInProgress);
            }
            let item = select_reward(&self.pool, rng)?.clone();
            let sequence_len = self.pool.len() * self.config.repeat_count as usize;
            let landing_offset =
                compute_landing_offset(sequence_len, self.item_width, self.viewport_width, rng)?;
            let outcome = CaseOutcome {
                item,
                landing_offset,
            };
            session.start_spin(outcome.clone())?;
            outcome
        };

        let spin_id = Uuid::new_v4();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(
            "🎰 CASE SPIN {}: drew {} (${:.2}) at {}, revealing in {:?}",
            spin_id,
            outcome.item.name,
            outcome.item.price,
            OffsetDateTime::now_utc(),
            self.config.case_reveal
        );

        let session = Arc::clone(&self.session);
        let live_generation = Arc::clone(&self.generation);
        let timer = RevealTimer::schedule(self.config.case_reveal, move || {
            let disclosed = {
                let mut session = session.lock().unwrap();
                if live_generation.load(Ordering::SeqCst) != generation {
                    return;
                }
                session.complete_spin().cloned()
            };
            if let Some(outcome) = disclosed {
                tracing::info!("🎰 CASE SPIN {}: revealed {}", spin_id, outcome.item.name);
                on_complete(&outcome);
            }
        });
        match timer {
            Ok(timer) => {
                self.timer = Some(timer);
                Ok(())
            }
            Err(e) => {
                self.session.lock().unwrap().reset();
                Err(e)
            }
        }
    }

    /// Returns to `Idle`, discarding the revealed outcome. Rejected while a
    /// spin is in flight; tear the instance down with
    /// [`CaseOpening::dispose`] instead.
    pub fn reset(&mut self) -> Result<(), GameError> {
        let mut session = self.session.lock().unwrap();
        if session.is_spinning() {
            return Err(GameError::SpinInProgress);
        }
        session.reset();
        drop(session);
        self.timer = None;
        Ok(())
    }

    /// Tears the session down. A pending reveal is cancelled silently and
    /// its callback never fires.
    pub fn dispose(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        let mut session = self.session.lock().unwrap();
        if session.is_spinning() {
            tracing::debug!("case spin torn down mid-flight: {}", GameError::Cancelled);
        }
        session.reset();
    }
}

impl Drop for CaseOpening {
    fn drop(&mut self) {
        self.dispose();
    }
}
