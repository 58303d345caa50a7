use std::time::Duration;

use castle_defence_core::{Command, Event, GamePhase, TacticalReward};
use castle_defence_system_defender_ai::DefenderAi;
use castle_defence_world::{self as world, query, World};

const TICK: Duration = Duration::from_millis(100);

fn frame(world: &mut World, ai: &mut DefenderAi) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: TICK }, &mut events);

    let defenders = query::defender_view(world);
    let enemies = query::enemy_view(world);
    let mut commands = Vec::new();
    ai.handle(
        &events,
        query::phase(world),
        &defenders,
        &enemies,
        &mut commands,
    );
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

/// Summons the squad on a small field so every spawn lane stays within the
/// archer's reach as enemies file past.
fn world_with_squad() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureField {
            width: 500.0,
            height: 400.0,
        },
        &mut events,
    );
    world::apply(&mut world, Command::StartGame, &mut events);
    for _ in 0..3 {
        world::apply(&mut world, Command::CompleteWave, &mut events);
    }
    assert_eq!(query::phase(&world), GamePhase::LevelUp);
    world::apply(
        &mut world,
        Command::ChooseReward {
            reward: TacticalReward::Defenders,
        },
        &mut events,
    );
    world
}

#[test]
fn the_squad_engages_a_passing_tank() {
    let mut world = world_with_squad();
    let mut ai = DefenderAi::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            kind: castle_defence_core::EnemyKind::Tank,
        },
        &mut events,
    );

    let spawns: Vec<_> = query::defender_view(&world)
        .into_vec()
        .iter()
        .map(|defender| defender.spawn)
        .collect();

    let mut struck = 0;
    let mut moved = false;
    for _ in 0..100 {
        let events = frame(&mut world, &mut ai);
        struck += events
            .iter()
            .filter(|event| matches!(event, Event::DefenderStruck { .. }))
            .count();

        let positions: Vec<_> = query::defender_view(&world)
            .into_vec()
            .iter()
            .map(|defender| defender.position)
            .collect();
        moved |= positions
            .iter()
            .zip(spawns.iter())
            .any(|(position, spawn)| position.distance_to(*spawn) > 1.0);
    }

    assert!(moved, "the squad repositions against the tank");
    assert!(struck > 0, "the archer lands strikes as the tank files past");
}

#[test]
fn the_squad_drifts_home_after_the_field_clears() {
    let mut world = world_with_squad();
    let mut ai = DefenderAi::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            kind: castle_defence_core::EnemyKind::Fast,
        },
        &mut events,
    );

    // Let the runner pass through and detonate against the castle.
    for _ in 0..60 {
        let _ = frame(&mut world, &mut ai);
    }
    assert_eq!(query::live_enemy_count(&world), 0);

    // Give the squad time to walk its displacement back.
    for _ in 0..200 {
        let _ = frame(&mut world, &mut ai);
    }

    for defender in query::defender_view(&world).into_vec() {
        assert!(
            defender.position.distance_to(defender.spawn) <= 2.0,
            "defender {:?} rests near its anchor",
            defender.id,
        );
    }
}

#[test]
fn strikes_stop_while_a_reward_is_pending() {
    let mut world = world_with_squad();
    let mut ai = DefenderAi::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            kind: castle_defence_core::EnemyKind::Tank,
        },
        &mut events,
    );

    // Pile up experience until a level-up pauses the simulation.
    while query::phase(&world) == GamePhase::Playing {
        world::apply(&mut world, Command::CompleteWave, &mut events);
    }
    assert_eq!(query::phase(&world), GamePhase::LevelUp);

    let defenders = query::defender_view(&world);
    let enemies = query::enemy_view(&world);
    let mut commands = Vec::new();
    ai.handle(
        &[Event::TimeAdvanced { dt: TICK }],
        query::phase(&world),
        &defenders,
        &enemies,
        &mut commands,
    );

    assert!(commands.is_empty(), "a paused simulation issues no orders");
}
