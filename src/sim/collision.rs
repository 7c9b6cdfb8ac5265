//! Bike vs entity collision and scoring
//!
//! The bike sits at a fixed screen x, so a hit is "entity lane within
//! tolerance of the bike's lane" and "the stretch of track the entity swept
//! this tick overlaps BIKE_X ± hit tolerance". Testing the swept stretch
//! keeps fast scroll settings from tunnelling entities through the bike.

use super::spawn::{Entity, EntityKind};
use crate::consts::BIKE_X;
use crate::tuning::CollisionTuning;

/// Result of a collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResult {
    /// Coins collected this pass (entity ids)
    pub coins: Vec<u32>,
    /// Obstacle that ended the run, if any
    pub obstacle: Option<u32>,
}

impl CollisionResult {
    pub fn crashed(&self) -> bool {
        self.obstacle.is_some()
    }
}

/// Whether an entity overlapped the bike while moving left by `step` this
/// tick (it travelled from `x + step` to `x`)
pub fn touches(entity: &Entity, step: f32, bike_lane: f32, tuning: &CollisionTuning) -> bool {
    let step = step.max(0.0);
    (entity.lane_y() - bike_lane).abs() <= tuning.lane_tolerance
        && entity.x <= BIKE_X + tuning.hit_tolerance
        && entity.x + step >= BIKE_X - tuning.hit_tolerance
}

/// Check every live entity against the bike.
///
/// `step` is how far entities scrolled this tick. Coins are latched as
/// collected and add one to `score`. An obstacle hit stops the pass
/// immediately.
pub fn check(
    entities: &mut [Entity],
    step: f32,
    bike_lane: f32,
    tuning: &CollisionTuning,
    score: &mut u64,
) -> CollisionResult {
    let mut result = CollisionResult::default();

    for entity in entities.iter_mut() {
        if entity.collected {
            continue;
        }
        if !touches(entity, step, bike_lane, tuning) {
            continue;
        }

        match entity.kind {
            EntityKind::Obstacle => {
                log::debug!("Hit obstacle #{} at x={:.3}", entity.id, entity.x);
                result.obstacle = Some(entity.id);
                return result;
            }
            EntityKind::Coin => {
                entity.collected = true;
                *score += 1;
                result.coins.push(entity.id);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Lane;
    use proptest::prelude::*;

    fn entity(id: u32, kind: EntityKind, x: f32, lane: Lane) -> Entity {
        Entity {
            id,
            kind,
            x,
            lane,
            collected: false,
        }
    }

    #[test]
    fn test_coin_scores_once() {
        let tuning = CollisionTuning::default();
        let mut entities = vec![entity(1, EntityKind::Coin, BIKE_X, Lane::Lower)];
        let mut score = 0;

        let result = check(&mut entities, 0.0, Lane::Lower.y(), &tuning, &mut score);
        assert_eq!(result.coins, vec![1]);
        assert_eq!(score, 1);
        assert!(entities[0].collected);

        // Still overlapping next tick: no second point
        for _ in 0..5 {
            let result = check(&mut entities, 0.0, Lane::Lower.y(), &tuning, &mut score);
            assert!(result.coins.is_empty());
        }
        assert_eq!(score, 1);
    }

    #[test]
    fn test_obstacle_in_lane_crashes() {
        let tuning = CollisionTuning::default();
        let mut entities = vec![entity(3, EntityKind::Obstacle, BIKE_X + 0.01, Lane::Upper)];
        let mut score = 0;
        let result = check(&mut entities, 0.0, Lane::Upper.y(), &tuning, &mut score);
        assert!(result.crashed());
        assert_eq!(result.obstacle, Some(3));
    }

    #[test]
    fn test_other_lane_misses() {
        let tuning = CollisionTuning::default();
        let mut entities = vec![
            entity(1, EntityKind::Obstacle, BIKE_X, Lane::Upper),
            entity(2, EntityKind::Coin, BIKE_X, Lane::Upper),
        ];
        let mut score = 0;
        let result = check(&mut entities, 0.0, Lane::Lower.y(), &tuning, &mut score);
        assert_eq!(result, CollisionResult::default());
        assert_eq!(score, 0);
    }

    #[test]
    fn test_out_of_reach_misses() {
        let tuning = CollisionTuning::default();
        let mut entities = vec![
            entity(1, EntityKind::Obstacle, BIKE_X + 0.2, Lane::Lower),
            entity(2, EntityKind::Obstacle, BIKE_X - 0.2, Lane::Lower),
        ];
        let mut score = 0;
        assert!(!check(&mut entities, 0.0, Lane::Lower.y(), &tuning, &mut score).crashed());
    }

    #[test]
    fn test_fast_entity_cannot_skip_the_bike() {
        let tuning = CollisionTuning::default();
        // Moved 0.125 this tick: from just right of the window to just left
        let mut entities = vec![
            entity(1, EntityKind::Obstacle, BIKE_X - 0.075, Lane::Lower),
            entity(2, EntityKind::Coin, BIKE_X - 0.075, Lane::Upper),
        ];
        let mut score = 0;
        let result = check(&mut entities, 0.125, Lane::Lower.y(), &tuning, &mut score);
        assert_eq!(result.obstacle, Some(1));

        let result = check(&mut entities, 0.125, Lane::Upper.y(), &tuning, &mut score);
        assert_eq!(result.coins, vec![2]);
        assert_eq!(score, 1);
    }

    #[test]
    fn test_swept_miss_when_already_past() {
        let tuning = CollisionTuning::default();
        // Started this tick already left of the window
        let mut entities = vec![entity(1, EntityKind::Obstacle, BIKE_X - 0.3, Lane::Lower)];
        let mut score = 0;
        assert!(!check(&mut entities, 0.1, Lane::Lower.y(), &tuning, &mut score).crashed());
    }

    #[test]
    fn test_mid_lane_change_within_tolerance() {
        let tuning = CollisionTuning::default();
        let mut entities = vec![entity(1, EntityKind::Coin, BIKE_X, Lane::Lower)];
        let mut score = 0;
        check(&mut entities, 0.0, Lane::Lower.y() - 0.05, &tuning, &mut score);
        assert_eq!(score, 1);
    }

    #[test]
    fn test_coins_before_obstacle_still_count() {
        let tuning = CollisionTuning::default();
        let mut entities = vec![
            entity(1, EntityKind::Coin, BIKE_X, Lane::Lower),
            entity(2, EntityKind::Obstacle, BIKE_X, Lane::Lower),
            entity(3, EntityKind::Coin, BIKE_X, Lane::Lower),
        ];
        let mut score = 0;
        let result = check(&mut entities, 0.0, Lane::Lower.y(), &tuning, &mut score);
        assert_eq!(result.coins, vec![1]);
        assert_eq!(result.obstacle, Some(2));
        assert_eq!(score, 1);
        assert!(!entities[2].collected);
    }

    proptest! {
        #[test]
        fn prop_score_matches_unique_coins(
            xs in proptest::collection::vec(0.0f32..0.4, 1..40),
            passes in 1usize..6,
        ) {
            let tuning = CollisionTuning::default();
            let mut entities: Vec<Entity> = xs
                .iter()
                .enumerate()
                .map(|(i, &x)| entity(i as u32 + 1, EntityKind::Coin, x, Lane::Lower))
                .collect();
            let mut score = 0;
            for _ in 0..passes {
                check(&mut entities, 0.0, Lane::Lower.y(), &tuning, &mut score);
            }
            let collected = entities.iter().filter(|e| e.collected).count() as u64;
            prop_assert_eq!(score, collected);
        }
    }
}
