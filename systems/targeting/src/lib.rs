#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that selects the castle's volley target from world snapshots.

use castle_defence_core::{AttackTarget, CastleSnapshot, EnemyView, GamePhase};

/// Castle targeting system performing a strict nearest-wins linear scan.
///
/// Distances are measured from the castle anchor to each enemy's center.
/// Ties are broken by iteration order, which the [`EnemyView`] fixes to
/// ascending identifiers: the longest-lived enemy wins.
#[derive(Debug, Default)]
pub struct Targeting;

impl Targeting {
    /// Creates a new targeting system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes the volley target for the provided world snapshot.
    ///
    /// Returns `None` outside the playing phase, when the field is empty, or
    /// when every enemy sits outside the castle's attack range.
    #[must_use]
    pub fn handle(
        &self,
        phase: GamePhase,
        castle: &CastleSnapshot,
        enemies: &EnemyView,
    ) -> Option<AttackTarget> {
        if phase != GamePhase::Playing {
            return None;
        }

        let mut best: Option<AttackTarget> = None;
        for snapshot in enemies.iter() {
            let distance = castle.anchor.distance_to(snapshot.center());
            if distance >= castle.attack_range {
                continue;
            }

            let closer = match &best {
                Some(current) => distance < current.distance,
                None => true,
            };
            if closer {
                best = Some(AttackTarget {
                    enemy: snapshot.id,
                    distance,
                });
            }
        }

        best
    }
}
