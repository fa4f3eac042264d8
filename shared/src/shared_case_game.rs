use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::GameError;
use crate::item::Item;

/// Outcome of a case opening, captured at spin start.
///
/// `landing_offset` already includes the per-spin jitter, so re-renders
/// mid-animation never recompute a different stop position.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaseOutcome {
    pub item: Item,
    pub landing_offset: f64,
}

/// Draws the winning item uniformly from the pool: each item wins with
/// probability `1 / pool.len()`. Weighting by rarity or price is deliberately
/// not done here; if it is ever wanted it must arrive as an explicit
/// parameter, not a silent bias.
pub fn select_reward<'a>(pool: &'a [Item], rng: &mut impl Rng) -> Result<&'a Item, GameError> {
    if pool.is_empty() {
        return Err(GameError::EmptyPool);
    }
    let index = rng.gen_range(0..pool.len());
    Ok(&pool[index])
}

/// Expands the pool into the strip shown while the case spins: the pool
/// repeated `repeat_count` times, order preserved. Purely visual; the winner
/// is drawn independently by [`select_reward`].
pub fn build_reveal_sequence(pool: &[Item], repeat_count: u32) -> Result<Vec<Item>, GameError> {
    if pool.is_empty() {
        return Err(GameError::EmptyPool);
    }
    if repeat_count == 0 {
        return Err(GameError::InvalidRepeatCount(repeat_count));
    }
    let mut sequence = Vec::with_capacity(pool.len() * repeat_count as usize);
    for _ in 0..repeat_count {
        sequence.extend_from_slice(pool);
    }
    Ok(sequence)
}

/// Computes the final strip translation so the winning slot stops centered
/// in the viewport, plus a jitter of at most half an item width drawn once
/// per spin.
pub fn compute_landing_offset(
    sequence_len: usize,
    item_width: f64,
    viewport_width: f64,
    rng: &mut impl Rng,
) -> Result<f64, GameError> {
    if sequence_len == 0 {
        return Err(GameError::EmptyPool);
    }
    if !(item_width > 0.0) || !(viewport_width > 0.0) {
        return Err(GameError::InvalidLayout);
    }
    let center_offset = viewport_width / 2.0 - item_width;
    let jitter = rng.gen_range(-item_width / 2.0..item_width / 2.0);
    Ok(-(sequence_len as f64 * item_width) + center_offset + jitter)
}
