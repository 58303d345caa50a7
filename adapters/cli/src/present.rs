//! Scene composition from world queries.
//!
//! A graphical client would hand the composed [`Scene`] to a
//! [`castle_defence_rendering::RenderingBackend`]; the headless driver
//! flattens it into a textual frame report instead.

use std::fmt::Write;

use anyhow::Result;
use castle_defence_rendering::{
    health_ratio, CastlePresentation, Color, DefenderPresentation, EnemyPresentation,
    FieldPresentation, HudPresentation, ProjectilePresentation, Scene,
};
use castle_defence_world::{query, World};
use glam::Vec2;

const FIELD_BACKGROUND: Color = Color::from_rgb_u8(0x2c, 0x3e, 0x2a);

/// Composes a presentation scene from the world's public snapshots.
pub(crate) fn compose_scene(world: &World) -> Result<Scene> {
    let bounds = query::field_bounds(world);
    let field = FieldPresentation::new(bounds.width(), bounds.height(), FIELD_BACKGROUND)?;

    let castle = query::castle_snapshot(world);
    let castle = CastlePresentation {
        anchor: Vec2::new(castle.anchor.x(), castle.anchor.y()),
        health_ratio: health_ratio(castle.health, castle.max_health),
        attack_range: castle.attack_range,
        towers: castle.towers,
    };

    let enemies = query::enemy_view(world)
        .iter()
        .map(|enemy| {
            let stats = enemy.kind.stats();
            let center = enemy.center();
            EnemyPresentation {
                id: enemy.id,
                kind: enemy.kind,
                center: Vec2::new(center.x(), center.y()),
                size: Vec2::new(stats.width, stats.height),
                health_ratio: health_ratio(enemy.health, enemy.max_health),
                slowed: enemy.slowed || query::moat_active(world),
            }
        })
        .collect();

    let defenders = query::defender_view(world)
        .iter()
        .map(|defender| {
            let center = defender.center();
            DefenderPresentation {
                id: defender.id,
                kind: defender.kind,
                center: Vec2::new(center.x(), center.y()),
                health_ratio: health_ratio(defender.health, defender.max_health),
            }
        })
        .collect();

    let projectiles = query::projectile_view(world)
        .iter()
        .map(|projectile| ProjectilePresentation {
            id: projectile.id,
            kind: projectile.kind,
            position: Vec2::new(projectile.position.x(), projectile.position.y()),
        })
        .collect();

    let resources = query::resources(world);
    let hud = HudPresentation {
        coins: resources.coins,
        level: resources.level,
        experience: resources.experience,
        experience_goal: resources.experience_goal,
        wave: resources.wave,
        upgrades: query::upgrade_ledger(world),
    };

    Ok(Scene::new(
        field,
        castle,
        enemies,
        defenders,
        projectiles,
        hud,
        query::phase(world),
    ))
}

/// Flattens a scene into the driver's end-of-session report.
pub(crate) fn describe(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "phase: {:?}", scene.phase);
    let _ = writeln!(
        out,
        "wave {} | level {} | {} coins | {}/{} xp",
        scene.hud.wave,
        scene.hud.level,
        scene.hud.coins,
        scene.hud.experience,
        scene.hud.experience_goal,
    );
    let _ = writeln!(
        out,
        "castle: {:.0}% health, {} tower(s), range {:.0}",
        scene.castle.health_ratio * 100.0,
        scene.castle.towers,
        scene.castle.attack_range,
    );
    let _ = writeln!(
        out,
        "field: {} enemies, {} defenders, {} projectiles",
        scene.enemies.len(),
        scene.defenders.len(),
        scene.projectiles.len(),
    );
    for upgrade in &scene.hud.upgrades {
        let _ = writeln!(
            out,
            "upgrade {:?}: level {}, next costs {}",
            upgrade.kind, upgrade.level, upgrade.price,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use castle_defence_core::{Command, GamePhase};
    use castle_defence_world::{self as world};

    #[test]
    fn scenes_mirror_the_world_snapshots() {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(&mut world, Command::StartGame, &mut events);
        world::apply(
            &mut world,
            Command::SpawnEnemy {
                kind: castle_defence_core::EnemyKind::Normal,
            },
            &mut events,
        );

        let scene = compose_scene(&world).expect("a valid scene");

        assert_eq!(scene.phase, GamePhase::Playing);
        assert_eq!(scene.enemies.len(), 1);
        assert_eq!(scene.castle.health_ratio, 1.0);
        assert_eq!(scene.hud.coins, 100);
        assert_eq!(scene.hud.upgrades.len(), 4);
        assert_eq!(scene.entity_count(), 2);
    }

    #[test]
    fn reports_name_the_session_state() {
        let world = World::new();
        let scene = compose_scene(&world).expect("a valid scene");

        let report = describe(&scene);

        assert!(report.contains("phase: Menu"));
        assert!(report.contains("100 coins"));
        assert!(report.contains("upgrade Damage: level 0, next costs 10"));
    }
}
