use std::time::Duration;

use castle_defence_core::{Command, Event, GamePhase, TacticalReward};
use castle_defence_system_combat::Combat;
use castle_defence_system_targeting::Targeting;
use castle_defence_world::{self as world, query, World};

const TICK: Duration = Duration::from_millis(100);

/// Drives one frame: advance the clock, then let targeting and combat answer.
fn frame(world: &mut World, targeting: &Targeting, combat: &Combat) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: TICK }, &mut events);

    let castle = query::castle_snapshot(world);
    let enemies = query::enemy_view(world);
    let target = targeting.handle(query::phase(world), &castle, &enemies);

    let mut commands = Vec::new();
    combat.handle(&events, query::phase(world), target.as_ref(), &mut commands);
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

/// Levels the player up through wave payouts and digs the moat so a single
/// normal enemy crawls slowly enough for the reload cycle to finish it.
fn prepared_world() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureField {
            width: 400.0,
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
            reward: TacticalReward::Moat,
        },
        &mut events,
    );
    assert!(query::moat_active(&world));
    world
}

#[test]
fn the_castle_hunts_down_a_normal_enemy() {
    let mut world = prepared_world();
    let targeting = Targeting::new();
    let combat = Combat::new();

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            kind: castle_defence_core::EnemyKind::Normal,
        },
        &mut events,
    );

    let coins_before = query::resources(&world).coins;
    let experience_before = query::resources(&world).experience;

    let mut killed = Vec::new();
    let mut struck_castle = false;
    for _ in 0..60 {
        let events = frame(&mut world, &targeting, &combat);
        killed.extend(events.iter().cloned().filter(|event| {
            matches!(event, Event::EnemyKilled { .. })
        }));
        struck_castle |= events
            .iter()
            .any(|event| matches!(event, Event::CastleStruck { .. }));
        if !killed.is_empty() {
            break;
        }
    }

    assert!(!struck_castle, "the volleys must win before the walls are hit");
    assert!(
        matches!(
            killed.as_slice(),
            [Event::EnemyKilled {
                reward: 5,
                experience: 10,
                ..
            }],
        ),
        "killed was {killed:?}",
    );

    let resources = query::resources(&world);
    assert_eq!(resources.coins, coins_before + 5);
    assert_eq!(resources.experience, experience_before + 10);
    assert!(query::enemy_view(&world).into_vec().is_empty());
}

#[test]
fn volleys_whiff_while_nothing_is_in_range() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartGame, &mut events);
    let targeting = Targeting::new();
    let combat = Combat::new();

    let mut fired = false;
    for _ in 0..30 {
        let events = frame(&mut world, &targeting, &combat);
        fired |= events
            .iter()
            .any(|event| matches!(event, Event::ProjectileFired { .. }));
    }

    assert!(!fired, "an empty field never draws fire");
    assert!(query::projectile_view(&world).into_vec().is_empty());
}

#[test]
fn distant_spawns_are_left_alone_until_they_close_in() {
    let mut world = World::new();
    let mut events = Vec::new();
    // A shallow field keeps every spawn lane within vertical reach.
    world::apply(
        &mut world,
        Command::ConfigureField {
            width: 1280.0,
            height: 500.0,
        },
        &mut events,
    );
    world::apply(&mut world, Command::StartGame, &mut events);
    let targeting = Targeting::new();
    let combat = Combat::new();

    world::apply(
        &mut world,
        Command::SpawnEnemy {
            kind: castle_defence_core::EnemyKind::Tank,
        },
        &mut events,
    );

    // The tank spawns at x = 1180 on the default field, far outside the
    // castle's 250-unit reach.
    let events = frame(&mut world, &targeting, &combat);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::ProjectileFired { .. })));

    let mut fired = false;
    for _ in 0..2_000 {
        let events = frame(&mut world, &targeting, &combat);
        fired |= events
            .iter()
            .any(|event| matches!(event, Event::ProjectileFired { .. }));
        if fired {
            break;
        }
    }
    assert!(fired, "the tank eventually walks into range");
}
