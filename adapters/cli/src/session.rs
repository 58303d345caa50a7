//! Per-frame orchestration of the world and its systems.
//!
//! The session owns the authoritative world plus every pure system and pumps
//! them in the contractual order: the clock advances first, then the wave
//! director, the castle's targeting and combat pair, and finally the defender
//! AI. Commands the systems emit are applied back to the world within the
//! same frame, and the accumulated event log is handed to the caller.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use castle_defence_core::{Command, Event};
use castle_defence_system_combat::Combat;
use castle_defence_system_defender_ai::DefenderAi;
use castle_defence_system_targeting::Targeting;
use castle_defence_system_wave_director::{Config as WaveConfig, WaveDirector};
use castle_defence_world::{self as world, query, World};

use crate::tuning::Tuning;

/// Owns the world and systems for one interactive session.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    wave_director: WaveDirector,
    targeting: Targeting,
    combat: Combat,
    defender_ai: DefenderAi,
}

impl Session {
    /// Builds a session configured by the provided tuning.
    pub(crate) fn new(tuning: &Tuning) -> Self {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::ConfigureField {
                width: tuning.field.width,
                height: tuning.field.height,
            },
            &mut events,
        );

        Self {
            world,
            wave_director: WaveDirector::new(WaveConfig::new(
                tuning.waves.base_enemies,
                Duration::from_millis(tuning.waves.spawn_interval_millis),
                tuning.waves.seed,
            )),
            targeting: Targeting::new(),
            combat: Combat::new(),
            defender_ai: DefenderAi::new(),
        }
    }

    /// Read access to the world for queries and presentation.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Applies an externally issued command and lets the systems react.
    pub(crate) fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.pump(&mut events);
        events
    }

    /// Advances the simulation by one frame.
    pub(crate) fn tick(&mut self, dt: Duration) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);
        self.pump(&mut events);
        events
    }

    /// Advances one frame, abandoning it if the simulation panics.
    ///
    /// The next frame proceeds normally; the lost frame's work is not
    /// retried.
    pub(crate) fn tick_guarded(&mut self, dt: Duration) -> Vec<Event> {
        match catch_unwind(AssertUnwindSafe(|| self.tick(dt))) {
            Ok(events) => events,
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|text| (*text).to_owned())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-textual panic payload".to_owned());
                log::error!("tick abandoned: {message}");
                Vec::new()
            }
        }
    }

    fn pump(&mut self, events: &mut Vec<Event>) {
        let phase = query::phase(&self.world);
        let mut commands = Vec::new();

        self.wave_director.handle(
            events,
            phase,
            query::live_enemy_count(&self.world),
            &mut commands,
        );

        let castle = query::castle_snapshot(&self.world);
        let enemies = query::enemy_view(&self.world);
        let target = self.targeting.handle(phase, &castle, &enemies);
        self.combat.handle(events, phase, target.as_ref(), &mut commands);

        let defenders = query::defender_view(&self.world);
        self.defender_ai
            .handle(events, phase, &defenders, &enemies, &mut commands);

        for command in commands {
            world::apply(&mut self.world, command, events);
        }
    }
}
