#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that drives defender posture, movement and strikes.
//!
//! Each defender scans for the nearest living enemy every frame. Archers keep
//! a preferred distance band to their target, knights close in, and both
//! drift back to their spawn anchor when the field is clear. Strikes are only
//! proposed for defenders whose reload cycle announced readiness this frame.

use std::time::Duration;

use castle_defence_core::{
    Command, DefenderId, DefenderKind, DefenderSnapshot, DefenderView, EnemySnapshot, EnemyView,
    Event, GamePhase,
};

const KNIGHT_CLOSE_FACTOR: f32 = 0.8;
const RETURN_SPEED_FACTOR: f32 = 0.5;
const ARRIVAL_TOLERANCE: f32 = 1.0;

/// Pure system that reacts to world events and emits defender commands.
#[derive(Debug, Default)]
pub struct DefenderAi {
    ready: Vec<DefenderId>,
}

impl DefenderAi {
    /// Creates a new defender AI system with an empty readiness scratchpad.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes events and immutable views to emit movement and strikes.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: GamePhase,
        defenders: &DefenderView,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if phase != GamePhase::Playing {
            return;
        }

        let mut accumulated = Duration::ZERO;
        self.ready.clear();
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    accumulated = accumulated.saturating_add(*dt);
                }
                Event::DefenderReady { defender } => self.ready.push(*defender),
                _ => {}
            }
        }

        let seconds = accumulated.as_secs_f32();
        if seconds == 0.0 && self.ready.is_empty() {
            return;
        }

        for defender in defenders.iter() {
            match nearest_enemy(defender, enemies) {
                Some((enemy, distance)) => {
                    if seconds > 0.0 {
                        self.push_engaged_movement(defender, enemy, distance, seconds, out);
                    }
                    let stats = defender.kind.stats();
                    if distance < stats.attack_range && self.ready.contains(&defender.id) {
                        out.push(Command::StrikeEnemy {
                            defender: defender.id,
                            target: enemy.id,
                        });
                    }
                }
                None => {
                    if seconds > 0.0 {
                        push_return_movement(defender, seconds, out);
                    }
                }
            }
        }
    }

    fn push_engaged_movement(
        &self,
        defender: &DefenderSnapshot,
        enemy: &EnemySnapshot,
        distance: f32,
        seconds: f32,
        out: &mut Vec<Command>,
    ) {
        let stats = defender.kind.stats();
        let band_low = stats.preferred_distance - stats.retreat_distance;
        let band_high = stats.preferred_distance + stats.retreat_distance;

        let heading = match defender.kind {
            DefenderKind::Archer => {
                if distance < band_low {
                    Heading::Away
                } else if distance > band_high {
                    Heading::Toward
                } else {
                    Heading::Hold
                }
            }
            DefenderKind::Knight => {
                if distance > stats.attack_range * KNIGHT_CLOSE_FACTOR {
                    Heading::Toward
                } else {
                    Heading::Hold
                }
            }
        };

        if heading == Heading::Hold || distance <= f32::EPSILON {
            return;
        }

        let from = defender.center();
        let to = enemy.center();
        let step = stats.move_speed * seconds;
        let (dx, dy) = match heading {
            Heading::Toward => (
                (to.x() - from.x()) / distance * step,
                (to.y() - from.y()) / distance * step,
            ),
            Heading::Away => (
                (from.x() - to.x()) / distance * step,
                (from.y() - to.y()) / distance * step,
            ),
            Heading::Hold => unreachable!("hold returned above"),
        };

        out.push(Command::MoveDefender {
            defender: defender.id,
            dx,
            dy,
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Heading {
    Toward,
    Away,
    Hold,
}

fn nearest_enemy<'view>(
    defender: &DefenderSnapshot,
    enemies: &'view EnemyView,
) -> Option<(&'view EnemySnapshot, f32)> {
    let from = defender.center();
    let mut best: Option<(&EnemySnapshot, f32)> = None;

    for enemy in enemies.iter() {
        let distance = from.distance_to(enemy.center());
        let closer = match &best {
            Some((_, current)) => distance < *current,
            None => true,
        };
        if closer {
            best = Some((enemy, distance));
        }
    }

    best
}

fn push_return_movement(defender: &DefenderSnapshot, seconds: f32, out: &mut Vec<Command>) {
    let home = defender.spawn;
    let position = defender.position;
    let distance = position.distance_to(home);
    if distance <= ARRIVAL_TOLERANCE {
        return;
    }

    let stats = defender.kind.stats();
    let step = (stats.move_speed * RETURN_SPEED_FACTOR * seconds).min(distance);
    out.push(Command::MoveDefender {
        defender: defender.id,
        dx: (home.x() - position.x()) / distance * step,
        dy: (home.y() - position.y()) / distance * step,
    });
}
