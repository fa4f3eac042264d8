use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use rand::Rng;
use uuid::Uuid;

use shared::error::GameError;
use shared::item::Item;
use shared::session::{SpinPhase, SpinSession};
use shared::shared_upgrade_game::{compute_chance, resolve_outcome, WheelOutcome};

use crate::config::EngineConfig;
use crate::timer::RevealTimer;

type CompletionCallback = Arc<dyn Fn(&WheelOutcome) + Send + Sync>;

/// One upgrade attempt: convert an owned item into a pricier target with a
/// probability derived from the price ratio, revealed on a two-zone wheel.
///
/// On success the caller swaps source for target in its inventory; on
/// failure it removes the source. Both happen outside this core, driven by
/// the completion callback.
pub struct UpgradeGame {
    source: Item,
    target: Item,
    config: EngineConfig,
    session: Arc<Mutex<SpinSession<WheelOutcome>>>,
    generation: Arc<AtomicU64>,
    on_complete: Option<CompletionCallback>,
    timer: Option<RevealTimer>,
}

impl UpgradeGame {
    pub fn new(source: Item, target: Item, config: EngineConfig) -> Result<Self, GameError> {
        let config = config.validated()?;
        // Reject an impossible pairing up front instead of at spin time.
        compute_chance(source.price, target.price, config.multiplier)?;
        Ok(Self {
            source,
            target,
            config,
            session: Arc::new(Mutex::new(SpinSession::new())),
            generation: Arc::new(AtomicU64::new(0)),
            on_complete: None,
            timer: None,
        })
    }

    /// Registers the sink the captured outcome is disclosed to. Must be set
    /// before the first [`UpgradeGame::start`]. The callback must not call
    /// back into this instance.
    pub fn on_complete<F>(&mut self, callback: F)
    where
        F: Fn(&WheelOutcome) + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(callback));
    }

    pub fn phase(&self) -> SpinPhase {
        self.session.lock().unwrap().phase
    }

    pub fn last_result(&self) -> Option<WheelOutcome> {
        self.session.lock().unwrap().result
    }

    pub fn source(&self) -> &Item {
        &self.source
    }

    pub fn target(&self) -> &Item {
        &self.target
    }

    /// The clamped success probability shown at the hub of the wheel.
    pub fn chance(&self) -> Result<f64, GameError> {
        compute_chance(self.source.price, self.target.price, self.config.multiplier)
    }

    /// Draws the Bernoulli trial, captures the wheel outcome, and schedules
    /// the single disclosure.
    pub fn start(&mut self, rng: &mut impl Rng) -> Result<(), GameError> {
        let on_complete = self
            .on_complete
            .clone()
            .ok_or(GameError::MissingCallback)?;

        let chance = self.chance()?;
        let outcome = {
            let mut session = self.session.lock().unwrap();
            if session.is_spinning() {
                return Err(GameError::SpinInProgress);
            }
            let outcome = resolve_outcome(chance, rng)?;
            session.start_spin(outcome)?;
            outcome
        };

        let spin_id = Uuid::new_v4();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(
            "🔄 UPGRADE SPIN {}: {} -> {} at {:.2}%, success={}, revealing in {:?}",
            spin_id,
            self.source.name,
            self.target.name,
            chance,
            outcome.success,
            self.config.upgrade_reveal
        );

        let session = Arc::clone(&self.session);
        let live_generation = Arc::clone(&self.generation);
        let timer = RevealTimer::schedule(self.config.upgrade_reveal, move || {
            let disclosed = {
                let mut session = session.lock().unwrap();
                if live_generation.load(Ordering::SeqCst) != generation {
                    return;
                }
                session.complete_spin().copied()
            };
            if let Some(outcome) = disclosed {
                tracing::info!(
                    "🔄 UPGRADE SPIN {}: wheel stopped at {:.1}°, success={}",
                    spin_id,
                    outcome.landing_rotation,
                    outcome.success
                );
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
    /// spin is in flight.
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
            tracing::debug!("upgrade spin torn down mid-flight: {}", GameError::Cancelled);
        }
        session.reset();
    }
}

impl Drop for UpgradeGame {
    fn drop(&mut self) {
        self.dispose();
    }
}
