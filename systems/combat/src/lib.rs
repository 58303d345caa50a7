#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns volley readiness into projectile firing commands.

use castle_defence_core::{AttackTarget, Command, Event, GamePhase};

/// Castle combat system that queues a volley when the castle is ready.
///
/// The castle's reload cycle runs inside the world regardless of target
/// availability; this system only answers the readiness announcement, so a
/// cycle with nothing in range simply whiffs.
#[derive(Debug, Default)]
pub struct Combat;

impl Combat {
    /// Creates a new combat system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits `Command::FireVolley` when a volley is ready and a target exists.
    pub fn handle(
        &self,
        events: &[Event],
        phase: GamePhase,
        target: Option<&AttackTarget>,
        out: &mut Vec<Command>,
    ) {
        if phase != GamePhase::Playing {
            return;
        }

        let ready = events
            .iter()
            .any(|event| matches!(event, Event::CastleVolleyReady));
        if !ready {
            return;
        }

        if let Some(target) = target {
            out.push(Command::FireVolley {
                target: target.enemy,
            });
        }
    }
}
