use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::constants::{FULL_SPIN_DEGREES, MAX_CHANCE, ZONE_JITTER_SPAN, ZONE_SPAN_DEGREES};
use crate::error::GameError;

/// The two angular halves of the upgrade wheel.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WheelZone {
    Success,
    Failure,
}

/// Outcome of an upgrade attempt, captured at spin start.
///
/// Invariant: `success` holds exactly when `landing_rotation` stops inside
/// the success zone. The render layer applies the rotation verbatim, so a
/// mismatch here would be a player-visible contradiction.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct WheelOutcome {
    pub success: bool,
    pub landing_rotation: f64,
}

/// Classifies a terminal rotation by the zone it visually stops in.
pub fn zone_of(rotation: f64) -> WheelZone {
    if rotation.rem_euclid(360.0) < ZONE_SPAN_DEGREES {
        WheelZone::Success
    } else {
        WheelZone::Failure
    }
}

/// Success probability of converting `source_price` into `target_price`,
/// as a percentage clamped to `0..=100`:
/// `min(100, source / target * 100 * multiplier)`.
pub fn compute_chance(
    source_price: f64,
    target_price: f64,
    multiplier: f64,
) -> Result<f64, GameError> {
    if !source_price.is_finite() || source_price < 0.0 {
        return Err(GameError::InvalidSourcePrice(source_price));
    }
    if !target_price.is_finite() || target_price <= 0.0 {
        return Err(GameError::InvalidTargetPrice(target_price));
    }
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(GameError::InvalidMultiplier(multiplier));
    }

    let raw = (source_price / target_price) * 100.0 * multiplier;
    if raw > MAX_CHANCE {
        log::debug!("upgrade chance clamped from {:.2} to {}", raw, MAX_CHANCE);
    }
    Ok(raw.min(MAX_CHANCE))
}

/// Draws one Bernoulli trial at `chance` percent and maps it to a terminal
/// wheel rotation: three full turns, then a jittered stop strictly inside
/// the matching zone.
pub fn resolve_outcome(chance: f64, rng: &mut impl Rng) -> Result<WheelOutcome, GameError> {
    if !chance.is_finite() || !(0.0..=MAX_CHANCE).contains(&chance) {
        return Err(GameError::InvalidChance(chance));
    }

    let roll = rng.gen_range(0.0..MAX_CHANCE);
    let success = roll < chance;

    let jitter = rng.gen_range(0.0..ZONE_JITTER_SPAN);
    let landing_rotation = if success {
        FULL_SPIN_DEGREES + jitter
    } else {
        FULL_SPIN_DEGREES + ZONE_SPAN_DEGREES + jitter
    };

    debug_assert_eq!(
        zone_of(landing_rotation) == WheelZone::Success,
        success,
        "draw and landing zone disagree"
    );

    Ok(WheelOutcome {
        success,
        landing_rotation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_chance_formula() {
        assert_eq!(compute_chance(50.0, 100.0, 1.0).unwrap(), 50.0);
        assert_eq!(compute_chance(50.0, 200.0, 1.5).unwrap(), 37.5);
        assert_eq!(compute_chance(0.0, 100.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_chance_clamps_to_one_hundred() {
        // 133.3% before the clamp.
        assert_eq!(compute_chance(100.0, 75.0, 1.0).unwrap(), 100.0);
        assert_eq!(compute_chance(50.0, 50.0, 3.0).unwrap(), 100.0);
    }

    #[test]
    fn test_chance_stays_in_bounds_over_sweep() {
        for source in 0..200 {
            for target in 1..40 {
                let chance = compute_chance(source as f64, target as f64 * 5.0, 1.5).unwrap();
                assert!((0.0..=100.0).contains(&chance));
            }
        }
    }

    #[test]
    fn test_chance_input_validation() {
        assert_eq!(
            compute_chance(50.0, 0.0, 1.0),
            Err(GameError::InvalidTargetPrice(0.0))
        );
        assert_eq!(
            compute_chance(-1.0, 100.0, 1.0),
            Err(GameError::InvalidSourcePrice(-1.0))
        );
        assert_eq!(
            compute_chance(50.0, 100.0, 0.0),
            Err(GameError::InvalidMultiplier(0.0))
        );
        assert!(compute_chance(f64::NAN, 100.0, 1.0).is_err());
        assert!(compute_chance(50.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_resolve_outcome_rejects_out_of_range_chance() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            resolve_outcome(-0.5, &mut rng),
            Err(GameError::InvalidChance(-0.5))
        );
        assert_eq!(
            resolve_outcome(100.1, &mut rng),
            Err(GameError::InvalidChance(100.1))
        );
        assert!(resolve_outcome(f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn test_outcome_and_landing_zone_never_disagree() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        for i in 0..10_000 {
            let chance = (i % 101) as f64;
            let outcome = resolve_outcome(chance, &mut rng).unwrap();
            let zone = zone_of(outcome.landing_rotation);
            assert_eq!(
                outcome.success,
                zone == WheelZone::Success,
                "contradiction at chance {}: {:?} landed in {:?}",
                chance,
                outcome,
                zone
            );
        }
    }

    #[test]
    fn test_landing_rotation_stays_inside_its_zone() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        for _ in 0..10_000 {
            let outcome = resolve_outcome(50.0, &mut rng).unwrap();
            if outcome.success {
                assert!(outcome.landing_rotation >= FULL_SPIN_DEGREES);
                assert!(outcome.landing_rotation < FULL_SPIN_DEGREES + ZONE_JITTER_SPAN);
            } else {
                assert!(outcome.landing_rotation >= FULL_SPIN_DEGREES + ZONE_SPAN_DEGREES);
                assert!(
                    outcome.landing_rotation
                        < FULL_SPIN_DEGREES + ZONE_SPAN_DEGREES + ZONE_JITTER_SPAN
                );
            }
            // Never exactly on a zone boundary.
            let angle = outcome.landing_rotation.rem_euclid(360.0);
            assert!(angle != 0.0 && angle != ZONE_SPAN_DEGREES);
        }
    }

    #[test]
    fn test_zero_chance_never_succeeds() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..1_000 {
            assert!(!resolve_outcome(0.0, &mut rng).unwrap().success);
        }
    }

    #[test]
    fn test_full_chance_always_succeeds() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        for _ in 0..1_000 {
            assert!(resolve_outcome(100.0, &mut rng).unwrap().success);
        }
    }

    #[test]
    fn test_success_rate_tracks_chance() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let trials = 10_000;
        let wins = (0..trials)
            .filter(|_| resolve_outcome(25.0, &mut rng).unwrap().success)
            .count();
        let rate = wins as f64 / trials as f64 * 100.0;
        assert!((rate - 25.0).abs() < 2.0, "observed rate {}", rate);
    }
}
