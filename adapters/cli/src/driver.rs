//! Scripted player standing in for a human during headless sessions.
//!
//! The policy reacts the way the UI would let a player act: it picks a
//! tactical reward whenever the level-up screen pauses the game and spends
//! coins on a random affordable upgrade after each wave payout. Decisions
//! flow through [`FrameInput`] so the driver exercises the same seam a
//! graphical client would.

use castle_defence_core::{Command, Event, GamePhase, TacticalReward};
use castle_defence_rendering::FrameInput;
use castle_defence_world::{query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded decision policy for the demo player.
#[derive(Debug)]
pub(crate) struct DemoPolicy {
    rng: ChaCha8Rng,
}

impl DemoPolicy {
    /// Creates a policy whose decisions replay for a given seed.
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Reacts to the frame's events with the player intents for this frame.
    pub(crate) fn react(&mut self, events: &[Event], world: &World) -> Vec<Command> {
        let mut input = FrameInput::default();

        if query::phase(world) == GamePhase::LevelUp {
            let index = self.rng.gen_range(0..TacticalReward::ALL.len());
            input.reward_choice = Some(TacticalReward::ALL[index]);
        }

        let wave_paid = events
            .iter()
            .any(|event| matches!(event, Event::WaveCompleted { .. }));
        if wave_paid {
            let coins = query::resources(world).coins;
            let affordable: Vec<_> = query::upgrade_ledger(world)
                .into_iter()
                .filter(|upgrade| upgrade.price <= coins)
                .collect();
            if !affordable.is_empty() {
                let index = self.rng.gen_range(0..affordable.len());
                input.purchase = Some(affordable[index].kind);
            }
        }

        input.into_commands()
    }
}
