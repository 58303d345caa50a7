#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Castle Defence.
//!
//! The world owns every entity collection exclusively. Adapters and systems
//! never hold references into it; they submit [`Command`] values through
//! [`apply`] and observe the resulting [`Event`] stream plus the read-only
//! snapshots exposed by [`query`].

use std::time::Duration;

use castle_defence_core::{
    Command, DefenderId, DefenderKind, EnemyId, EnemyKind, Event, FieldBounds, FieldPoint,
    FieldRect, GamePhase, ProjectileId, ProjectileKind, PurchaseError, TacticalReward, UpgradeKind,
    MAX_FRAME_DELTA, WELCOME_BANNER,
};

const WORLD_RNG_SEED: u64 = 0x6c8e_944d_1f3a_52b7;

const DEFAULT_FIELD_WIDTH: f32 = 1280.0;
const DEFAULT_FIELD_HEIGHT: f32 = 720.0;

const STARTING_COINS: u32 = 100;
const STARTING_LEVEL: u32 = 1;
const BASE_EXPERIENCE_GOAL: u32 = 100;
const EXPERIENCE_GOAL_GROWTH: f32 = 1.5;

const CASTLE_BASE_HEALTH: f32 = 100.0;
const CASTLE_BASE_DAMAGE: f32 = 10.0;
const CASTLE_BASE_RANGE: f32 = 250.0;
const CASTLE_BASE_ATTACK_SPEED: f32 = 1.0;
const CASTLE_CRITICAL_CHANCE: f32 = 0.1;
const CASTLE_CRITICAL_MULTIPLIER: f32 = 2.0;
const CASTLE_MAX_TOWERS: u32 = 4;
const CASTLE_REGEN_PER_SECOND: f32 = 0.1;
const CASTLE_FRONT_X: f32 = 200.0;

const ENEMY_SPAWN_MARGIN: f32 = 100.0;
const ENEMY_SPAWN_PADDING: f32 = 50.0;
const MOAT_SLOW_FACTOR: f32 = 0.5;

const PROJECTILE_RANGE_FACTOR: f32 = 1.5;
const PROJECTILE_BOUNDS_MARGIN: f32 = 100.0;

const WAVE_COIN_REWARD_PER_WAVE: u32 = 10;
const WAVE_EXPERIENCE_REWARD_PER_WAVE: u32 = 15;
const BONUS_COIN_GRANT: u32 = 100;

const WALL_HEALTH_FACTOR: f32 = 1.5;
const DAMAGE_UPGRADE_FACTOR: f32 = 1.1;
const RANGE_UPGRADE_FACTOR: f32 = 1.05;
const RELOAD_UPGRADE_FACTOR: f32 = 1.05;
const HEALTH_UPGRADE_FACTOR: f32 = 1.2;

const DEFENDER_SQUAD_SIZE: u32 = 2;
const DEFENDER_LINE_X: f32 = 250.0;
const DEFENDER_COLUMN_SPACING: f32 = 70.0;
const DEFENDER_ROW_SPACING: f32 = 30.0;
const DEFENDER_ROW_OFFSET: f32 = -30.0;
const DEFENDER_MIN_Y: f32 = 50.0;
const DEFENDER_BOTTOM_MARGIN: f32 = 100.0;
const DEFENDER_RETREAT_LIMIT_X: f32 = 100.0;
const DEFENDER_MAX_ADVANCE: f32 = 150.0;

/// Represents the authoritative Castle Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    phase: GamePhase,
    bounds: FieldBounds,
    castle: Castle,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    defenders: Vec<Defender>,
    next_enemy: u32,
    next_projectile: u32,
    next_defender: u32,
    moat_active: bool,
    upgrades: UpgradeLedger,
    tactical: TacticalFlags,
    coins: u32,
    experience: u32,
    level: u32,
    experience_goal: u32,
    wave: u32,
    rng: SplitMix64,
}

impl World {
    /// Creates a new Castle Defence world idling on the title screen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            phase: GamePhase::Menu,
            bounds: FieldBounds::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT),
            castle: Castle::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            defenders: Vec::new(),
            next_enemy: 0,
            next_projectile: 0,
            next_defender: 0,
            moat_active: false,
            upgrades: UpgradeLedger::new(),
            tactical: TacticalFlags::default(),
            coins: STARTING_COINS,
            experience: 0,
            level: STARTING_LEVEL,
            experience_goal: BASE_EXPERIENCE_GOAL,
            wave: 1,
            rng: SplitMix64::new(WORLD_RNG_SEED),
        }
    }

    fn castle_anchor(&self) -> FieldPoint {
        FieldPoint::new(CASTLE_FRONT_X, self.bounds.height() / 2.0)
    }

    fn enemy_index(&self, enemy: EnemyId) -> Option<usize> {
        self.enemies
            .iter()
            .position(|candidate| candidate.id == enemy && !candidate.dead)
    }

    fn defender_index(&self, defender: DefenderId) -> Option<usize> {
        self.defenders
            .iter()
            .position(|candidate| candidate.id == defender && !candidate.dead)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureField { width, height } => {
            if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
                world.bounds = FieldBounds::new(width, height);
                out_events.push(Event::FieldConfigured {
                    bounds: world.bounds,
                });
            }
        }
        Command::StartGame => start_game(world, out_events),
        Command::ReturnToMenu => {
            world.phase = GamePhase::Menu;
            out_events.push(Event::PhaseChanged {
                phase: GamePhase::Menu,
            });
        }
        Command::Tick { dt } => tick(world, dt, out_events),
        Command::SpawnEnemy { kind } => spawn_enemy(world, kind, out_events),
        Command::FireVolley { target } => fire_volley(world, target, out_events),
        Command::MoveDefender { defender, dx, dy } => move_defender(world, defender, dx, dy),
        Command::StrikeEnemy { defender, target } => {
            strike_enemy(world, defender, target, out_events);
        }
        Command::BeginWave { enemies_to_spawn } => {
            if world.phase == GamePhase::Playing {
                out_events.push(Event::WaveStarted {
                    wave: world.wave,
                    enemies_to_spawn,
                });
            }
        }
        Command::CompleteWave => complete_wave(world, out_events),
        Command::PurchaseUpgrade { kind } => purchase_upgrade(world, kind, out_events),
        Command::ChooseReward { reward } => choose_reward(world, reward, out_events),
        Command::GrantBonusCoins => {
            world.coins = world.coins.saturating_add(BONUS_COIN_GRANT);
            out_events.push(Event::BonusCoinsGranted {
                amount: BONUS_COIN_GRANT,
                coins: world.coins,
            });
        }
    }
}

fn start_game(world: &mut World, out_events: &mut Vec<Event>) {
    world.coins = STARTING_COINS;
    world.experience = 0;
    world.level = STARTING_LEVEL;
    world.experience_goal = BASE_EXPERIENCE_GOAL;
    world.wave = 1;
    world.moat_active = false;
    world.tactical = TacticalFlags::default();
    world.enemies.clear();
    world.projectiles.clear();
    world.defenders.clear();
    world.next_enemy = 0;
    world.next_projectile = 0;
    world.next_defender = 0;
    world.castle.reset();
    world.rng = SplitMix64::new(WORLD_RNG_SEED);
    world.phase = GamePhase::Playing;
    out_events.push(Event::GameStarted);
    out_events.push(Event::PhaseChanged {
        phase: GamePhase::Playing,
    });
}

fn tick(world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
    let dt = dt.min(MAX_FRAME_DELTA);
    out_events.push(Event::TimeAdvanced { dt });

    if world.phase != GamePhase::Playing {
        return;
    }

    let seconds = dt.as_secs_f32();

    advance_enemies(world, seconds, out_events);
    world.enemies.retain(|enemy| !enemy.dead);

    advance_projectiles(world, seconds, out_events);
    world.projectiles.retain(|projectile| !projectile.expired);

    advance_defenders(world, dt, out_events);
    world.defenders.retain(|defender| !defender.dead);

    resolve_collisions(world, out_events);
    world.projectiles.retain(|projectile| !projectile.expired);
    world.enemies.retain(|enemy| !enemy.dead);

    advance_castle(world, dt, seconds, out_events);

    if world.castle.health <= 0.0 && world.phase == GamePhase::Playing {
        world.phase = GamePhase::GameOver;
        out_events.push(Event::GameEnded {
            wave: world.wave,
            coins: world.coins,
            experience: world.experience,
        });
        out_events.push(Event::PhaseChanged {
            phase: GamePhase::GameOver,
        });
    }
}

fn advance_enemies(world: &mut World, seconds: f32, out_events: &mut Vec<Event>) {
    for enemy in world.enemies.iter_mut() {
        if enemy.dead {
            continue;
        }

        let stats = enemy.kind.stats();
        let factor = if enemy.slowed || world.moat_active {
            MOAT_SLOW_FACTOR
        } else {
            1.0
        };
        enemy.x -= stats.speed * factor * seconds;

        if enemy.x < -stats.width {
            enemy.dead = true;
            out_events.push(Event::EnemyEscaped { enemy: enemy.id });
        }
    }
}

fn advance_projectiles(world: &mut World, seconds: f32, out_events: &mut Vec<Event>) {
    for projectile in world.projectiles.iter_mut() {
        if projectile.expired {
            continue;
        }

        let step_x = projectile.velocity_x * seconds;
        let step_y = projectile.velocity_y * seconds;
        projectile.x += step_x;
        projectile.y += step_y;
        projectile.traveled += (step_x * step_x + step_y * step_y).sqrt();

        let position = FieldPoint::new(projectile.x, projectile.y);
        let target_alive = world
            .enemies
            .iter()
            .any(|enemy| enemy.id == projectile.target && !enemy.dead);

        if projectile.traveled > projectile.max_distance
            || !world
                .bounds
                .contains_with_margin(position, PROJECTILE_BOUNDS_MARGIN)
            || !target_alive
        {
            projectile.expired = true;
            out_events.push(Event::ProjectileExpired {
                projectile: projectile.id,
            });
        }
    }
}

fn advance_defenders(world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
    for defender in world.defenders.iter_mut() {
        if defender.dead {
            continue;
        }

        defender.cooldown = defender.cooldown.saturating_sub(dt);
        if defender.cooldown.is_zero() {
            let stats = defender.kind.stats();
            defender.cooldown = Duration::from_secs_f32(1.0 / stats.attack_speed);
            out_events.push(Event::DefenderReady {
                defender: defender.id,
            });
        }
    }
}

fn resolve_collisions(world: &mut World, out_events: &mut Vec<Event>) {
    for index in 0..world.projectiles.len() {
        if world.projectiles[index].expired {
            continue;
        }

        let target = world.projectiles[index].target;
        let Some(enemy_index) = world.enemy_index(target) else {
            let projectile = &mut world.projectiles[index];
            projectile.expired = true;
            out_events.push(Event::ProjectileExpired {
                projectile: projectile.id,
            });
            continue;
        };

        let overlapping = world.projectiles[index]
            .bounding()
            .intersects(&world.enemies[enemy_index].bounding());
        if overlapping {
            let projectile_id = world.projectiles[index].id;
            let damage = world.projectiles[index].damage;
            world.projectiles[index].expired = true;
            out_events.push(Event::ProjectileHit {
                projectile: projectile_id,
                target,
                damage,
            });
            damage_enemy(world, enemy_index, damage, out_events);
        }
    }

    for index in 0..world.enemies.len() {
        if world.enemies[index].dead {
            continue;
        }

        if world.enemies[index].x < CASTLE_FRONT_X {
            let enemy_id = world.enemies[index].id;
            let damage = world.enemies[index].kind.stats().damage;
            world.castle.take_damage(damage as f32);
            world.enemies[index].dead = true;
            out_events.push(Event::CastleStruck {
                enemy: enemy_id,
                damage,
                remaining: world.castle.health,
            });
        }
    }
}

fn advance_castle(world: &mut World, dt: Duration, seconds: f32, out_events: &mut Vec<Event>) {
    world.castle.cooldown = world.castle.cooldown.saturating_sub(dt);
    if world.castle.cooldown.is_zero() {
        world.castle.cooldown = Duration::from_secs_f32(1.0 / world.castle.attack_speed);
        out_events.push(Event::CastleVolleyReady);
    }

    // A destroyed castle stays destroyed; regen must not mask the terminal check.
    if world.castle.health > 0.0 && world.castle.health < world.castle.max_health {
        world.castle.health = world
            .castle
            .max_health
            .min(world.castle.health + CASTLE_REGEN_PER_SECOND * seconds);
    }
}

fn spawn_enemy(world: &mut World, kind: EnemyKind, out_events: &mut Vec<Event>) {
    if world.phase != GamePhase::Playing {
        return;
    }

    let stats = kind.stats();
    let x = world.bounds.width() - ENEMY_SPAWN_MARGIN;
    let span = (world.bounds.height() - stats.height - 2.0 * ENEMY_SPAWN_PADDING).max(0.0);
    let y = ENEMY_SPAWN_PADDING + world.rng.next_unit() as f32 * span;

    let id = EnemyId::new(world.next_enemy);
    world.next_enemy = world.next_enemy.saturating_add(1);
    world.enemies.push(Enemy {
        id,
        kind,
        x,
        y,
        health: stats.health,
        dead: false,
        slowed: false,
    });
    out_events.push(Event::EnemySpawned {
        enemy: id,
        kind,
        position: FieldPoint::new(x, y),
    });
}

fn fire_volley(world: &mut World, target: EnemyId, out_events: &mut Vec<Event>) {
    if world.phase != GamePhase::Playing {
        return;
    }

    let Some(enemy_index) = world.enemy_index(target) else {
        return;
    };
    let target_center = world.enemies[enemy_index].center();
    let anchor = world.castle_anchor();
    let max_distance = world.castle.attack_range * PROJECTILE_RANGE_FACTOR;

    for _ in 0..world.castle.towers {
        let critical = (world.rng.next_unit() as f32) < world.castle.critical_chance;
        let kind = if critical {
            ProjectileKind::Critical
        } else {
            ProjectileKind::Standard
        };
        let damage = if critical {
            world.castle.damage * world.castle.critical_multiplier
        } else {
            world.castle.damage
        };

        let dx = target_center.x() - anchor.x();
        let dy = target_center.y() - anchor.y();
        let distance = (dx * dx + dy * dy).sqrt();
        if distance == 0.0 {
            continue;
        }

        let id = ProjectileId::new(world.next_projectile);
        world.next_projectile = world.next_projectile.saturating_add(1);
        world.projectiles.push(Projectile {
            id,
            kind,
            x: anchor.x(),
            y: anchor.y(),
            velocity_x: dx / distance * kind.speed(),
            velocity_y: dy / distance * kind.speed(),
            damage,
            target,
            traveled: 0.0,
            max_distance,
            expired: false,
        });
        out_events.push(Event::ProjectileFired {
            projectile: id,
            kind,
            target,
        });
    }
}

fn move_defender(world: &mut World, defender: DefenderId, dx: f32, dy: f32) {
    if world.phase != GamePhase::Playing || !dx.is_finite() || !dy.is_finite() {
        return;
    }

    let bottom = world.bounds.height() - DEFENDER_BOTTOM_MARGIN;
    let Some(index) = world.defender_index(defender) else {
        return;
    };

    let unit = &mut world.defenders[index];
    unit.x = (unit.x + dx).clamp(DEFENDER_RETREAT_LIMIT_X, unit.spawn_x + DEFENDER_MAX_ADVANCE);
    unit.y = (unit.y + dy).clamp(DEFENDER_MIN_Y, bottom);
}

fn strike_enemy(world: &mut World, defender: DefenderId, target: EnemyId, out_events: &mut Vec<Event>) {
    if world.phase != GamePhase::Playing {
        return;
    }

    let Some(defender_index) = world.defender_index(defender) else {
        return;
    };
    let Some(enemy_index) = world.enemy_index(target) else {
        return;
    };

    let damage = world.defenders[defender_index].kind.stats().damage;
    out_events.push(Event::DefenderStruck {
        defender,
        target,
        damage,
    });
    damage_enemy(world, enemy_index, damage, out_events);
}

fn complete_wave(world: &mut World, out_events: &mut Vec<Event>) {
    if world.phase != GamePhase::Playing {
        return;
    }

    let cleared = world.wave;
    world.wave = world.wave.saturating_add(1);
    let coin_reward = world.wave * WAVE_COIN_REWARD_PER_WAVE;
    let experience_reward = world.wave * WAVE_EXPERIENCE_REWARD_PER_WAVE;
    world.coins = world.coins.saturating_add(coin_reward);
    out_events.push(Event::WaveCompleted {
        wave: cleared,
        coins: coin_reward,
        experience: experience_reward,
    });
    grant_experience(world, experience_reward, out_events);
}

fn purchase_upgrade(world: &mut World, kind: UpgradeKind, out_events: &mut Vec<Event>) {
    if world.phase != GamePhase::Playing {
        return;
    }

    let level = world.upgrades.track(kind).level;
    let price = kind.price_curve().price(level);
    if world.coins < price {
        out_events.push(Event::UpgradeRejected {
            kind,
            reason: PurchaseError::InsufficientFunds {
                price,
                coins: world.coins,
            },
        });
        return;
    }

    world.coins -= price;
    let track = world.upgrades.track_mut(kind);
    track.level += 1;
    let reached = track.level;

    match kind {
        UpgradeKind::Damage => {
            world.castle.damage = (world.castle.damage * DAMAGE_UPGRADE_FACTOR).floor();
            world.upgrades.track_mut(kind).multiplier *= DAMAGE_UPGRADE_FACTOR;
        }
        UpgradeKind::Range => {
            world.castle.attack_range = (world.castle.attack_range * RANGE_UPGRADE_FACTOR).floor();
            world.upgrades.track_mut(kind).multiplier *= RANGE_UPGRADE_FACTOR;
        }
        UpgradeKind::Reload => {
            world.castle.attack_speed *= RELOAD_UPGRADE_FACTOR;
            world.upgrades.track_mut(kind).multiplier *= RELOAD_UPGRADE_FACTOR;
        }
        UpgradeKind::Health => {
            world.castle.max_health = (world.castle.max_health * HEALTH_UPGRADE_FACTOR).floor();
            world.castle.health = world.castle.max_health;
            world.upgrades.track_mut(kind).multiplier *= HEALTH_UPGRADE_FACTOR;
        }
    }

    out_events.push(Event::UpgradePurchased {
        kind,
        level: reached,
        price,
        coins: world.coins,
    });
}

fn choose_reward(world: &mut World, reward: TacticalReward, out_events: &mut Vec<Event>) {
    if world.phase != GamePhase::LevelUp {
        return;
    }

    let applied = match reward {
        TacticalReward::Wall => {
            world.castle.max_health *= WALL_HEALTH_FACTOR;
            world.castle.health = world.castle.max_health;
            world.tactical.wall = true;
            true
        }
        TacticalReward::Tower => {
            if world.castle.towers < world.castle.max_towers {
                world.castle.towers += 1;
                world.tactical.tower = true;
                true
            } else {
                false
            }
        }
        TacticalReward::Moat => {
            world.moat_active = true;
            world.tactical.moat = true;
            true
        }
        TacticalReward::Defenders => {
            spawn_defender_squad(world, DEFENDER_SQUAD_SIZE);
            world.tactical.defenders = true;
            true
        }
    };

    if applied {
        out_events.push(Event::RewardApplied { reward });
    }
    world.phase = GamePhase::Playing;
    out_events.push(Event::PhaseChanged {
        phase: GamePhase::Playing,
    });
}

fn spawn_defender_squad(world: &mut World, count: u32) {
    world.defenders.clear();
    let center_y = world.bounds.height() / 2.0;
    let bottom = world.bounds.height() - DEFENDER_BOTTOM_MARGIN;

    for slot in 0..count {
        let kind = if slot % 2 == 0 {
            DefenderKind::Archer
        } else {
            DefenderKind::Knight
        };
        let stats = kind.stats();
        let x = DEFENDER_LINE_X + slot as f32 * DEFENDER_COLUMN_SPACING;
        let y = (center_y + DEFENDER_ROW_OFFSET + slot as f32 * DEFENDER_ROW_SPACING)
            .clamp(DEFENDER_MIN_Y, bottom);

        let id = DefenderId::new(world.next_defender);
        world.next_defender = world.next_defender.saturating_add(1);
        world.defenders.push(Defender {
            id,
            kind,
            x,
            y,
            spawn_x: x,
            spawn_y: y,
            health: stats.health,
            dead: false,
            cooldown: Duration::ZERO,
        });
    }
}

fn damage_enemy(world: &mut World, index: usize, amount: f32, out_events: &mut Vec<Event>) {
    let enemy = &mut world.enemies[index];
    if enemy.dead {
        return;
    }

    enemy.health -= amount;
    let killed = enemy.health <= 0.0;
    if killed {
        enemy.health = 0.0;
        enemy.dead = true;
    }

    if killed {
        let id = world.enemies[index].id;
        let stats = world.enemies[index].kind.stats();
        world.coins = world.coins.saturating_add(stats.reward);
        out_events.push(Event::EnemyKilled {
            enemy: id,
            reward: stats.reward,
            experience: stats.experience,
        });
        grant_experience(world, stats.experience, out_events);
    }
}

fn grant_experience(world: &mut World, amount: u32, out_events: &mut Vec<Event>) {
    world.experience = world.experience.saturating_add(amount);

    let mut leveled = false;
    while world.experience >= world.experience_goal {
        world.experience -= world.experience_goal;
        world.level = world.level.saturating_add(1);
        world.experience_goal =
            (world.experience_goal as f32 * EXPERIENCE_GOAL_GROWTH).floor() as u32;
        out_events.push(Event::LevelReached { level: world.level });
        leveled = true;
    }

    if leveled && world.phase == GamePhase::Playing {
        world.phase = GamePhase::LevelUp;
        out_events.push(Event::PhaseChanged {
            phase: GamePhase::LevelUp,
        });
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use castle_defence_core::{
        CastleSnapshot, DefenderSnapshot, DefenderView, EnemySnapshot, EnemyView, FieldBounds,
        FieldPoint, GamePhase, ProjectileSnapshot, ProjectileView, ResourceSnapshot,
        TacticalSnapshot, UpgradeKind, UpgradeSnapshot,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Reports the phase the session currently occupies.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Provides the dimensions of the playing field.
    #[must_use]
    pub fn field_bounds(world: &World) -> FieldBounds {
        world.bounds
    }

    /// Captures a read-only snapshot of the castle.
    #[must_use]
    pub fn castle_snapshot(world: &World) -> CastleSnapshot {
        CastleSnapshot {
            health: world.castle.health,
            max_health: world.castle.max_health,
            damage: world.castle.damage,
            attack_range: world.castle.attack_range,
            attack_speed: world.castle.attack_speed,
            ready_in: world.castle.cooldown,
            critical_chance: world.castle.critical_chance,
            critical_multiplier: world.castle.critical_multiplier,
            towers: world.castle.towers,
            max_towers: world.castle.max_towers,
            anchor: world.castle_anchor(),
        }
    }

    /// Captures a read-only view of the live enemies on the field.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .filter(|enemy| !enemy.dead)
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    kind: enemy.kind,
                    position: FieldPoint::new(enemy.x, enemy.y),
                    health: enemy.health,
                    max_health: enemy.kind.stats().health,
                    slowed: enemy.slowed,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the live defenders on the field.
    #[must_use]
    pub fn defender_view(world: &World) -> DefenderView {
        DefenderView::from_snapshots(
            world
                .defenders
                .iter()
                .filter(|defender| !defender.dead)
                .map(|defender| DefenderSnapshot {
                    id: defender.id,
                    kind: defender.kind,
                    position: FieldPoint::new(defender.x, defender.y),
                    spawn: FieldPoint::new(defender.spawn_x, defender.spawn_y),
                    health: defender.health,
                    max_health: defender.kind.stats().health,
                    ready_in: defender.cooldown,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .filter(|projectile| !projectile.expired)
                .map(|projectile| ProjectileSnapshot {
                    id: projectile.id,
                    kind: projectile.kind,
                    position: FieldPoint::new(projectile.x, projectile.y),
                    target: projectile.target,
                    damage: projectile.damage,
                    traveled: projectile.traveled,
                })
                .collect(),
        )
    }

    /// Reports the player's session resources.
    #[must_use]
    pub fn resources(world: &World) -> ResourceSnapshot {
        ResourceSnapshot {
            coins: world.coins,
            experience: world.experience,
            level: world.level,
            experience_goal: world.experience_goal,
            wave: world.wave,
        }
    }

    /// Reports every permanent upgrade track with its next price.
    #[must_use]
    pub fn upgrade_ledger(world: &World) -> Vec<UpgradeSnapshot> {
        UpgradeKind::ALL
            .iter()
            .map(|kind| {
                let track = world.upgrades.track(*kind);
                UpgradeSnapshot {
                    kind: *kind,
                    level: track.level,
                    multiplier: track.multiplier,
                    price: kind.price_curve().price(track.level),
                }
            })
            .collect()
    }

    /// Reports which tactical rewards were taken this session.
    #[must_use]
    pub fn tactical_snapshot(world: &World) -> TacticalSnapshot {
        TacticalSnapshot {
            wall: world.tactical.wall,
            tower: world.tactical.tower,
            moat: world.tactical.moat,
            defenders: world.tactical.defenders,
        }
    }

    /// Reports whether the moat slows every enemy on the field.
    #[must_use]
    pub fn moat_active(world: &World) -> bool {
        world.moat_active
    }

    /// Counts the enemies currently alive on the field.
    #[must_use]
    pub fn live_enemy_count(world: &World) -> usize {
        world.enemies.iter().filter(|enemy| !enemy.dead).count()
    }
}

#[derive(Debug)]
struct Castle {
    health: f32,
    max_health: f32,
    damage: f32,
    attack_range: f32,
    attack_speed: f32,
    cooldown: Duration,
    critical_chance: f32,
    critical_multiplier: f32,
    towers: u32,
    max_towers: u32,
}

impl Castle {
    fn new() -> Self {
        Self {
            health: CASTLE_BASE_HEALTH,
            max_health: CASTLE_BASE_HEALTH,
            damage: CASTLE_BASE_DAMAGE,
            attack_range: CASTLE_BASE_RANGE,
            attack_speed: CASTLE_BASE_ATTACK_SPEED,
            cooldown: Duration::ZERO,
            critical_chance: CASTLE_CRITICAL_CHANCE,
            critical_multiplier: CASTLE_CRITICAL_MULTIPLIER,
            towers: 1,
            max_towers: CASTLE_MAX_TOWERS,
        }
    }

    fn reset(&mut self) {
        self.health = self.max_health;
        self.towers = 1;
        self.cooldown = Duration::ZERO;
    }

    fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }
}

#[derive(Debug)]
struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    x: f32,
    y: f32,
    health: f32,
    dead: bool,
    slowed: bool,
}

impl Enemy {
    fn bounding(&self) -> FieldRect {
        let stats = self.kind.stats();
        FieldRect::from_origin_and_size(FieldPoint::new(self.x, self.y), stats.width, stats.height)
    }

    fn center(&self) -> FieldPoint {
        self.bounding().center()
    }
}

#[derive(Debug)]
struct Projectile {
    id: ProjectileId,
    kind: ProjectileKind,
    x: f32,
    y: f32,
    velocity_x: f32,
    velocity_y: f32,
    damage: f32,
    target: EnemyId,
    traveled: f32,
    max_distance: f32,
    expired: bool,
}

impl Projectile {
    fn bounding(&self) -> FieldRect {
        let side = self.kind.dimension();
        FieldRect::from_origin_and_size(FieldPoint::new(self.x, self.y), side, side)
    }
}

#[derive(Debug)]
struct Defender {
    id: DefenderId,
    kind: DefenderKind,
    x: f32,
    y: f32,
    spawn_x: f32,
    spawn_y: f32,
    health: f32,
    dead: bool,
    cooldown: Duration,
}

#[derive(Clone, Copy, Debug)]
struct UpgradeTrack {
    level: u32,
    multiplier: f32,
}

impl UpgradeTrack {
    fn new() -> Self {
        Self {
            level: 0,
            multiplier: 1.0,
        }
    }
}

#[derive(Debug)]
struct UpgradeLedger {
    damage: UpgradeTrack,
    range: UpgradeTrack,
    reload: UpgradeTrack,
    health: UpgradeTrack,
}

impl UpgradeLedger {
    fn new() -> Self {
        Self {
            damage: UpgradeTrack::new(),
            range: UpgradeTrack::new(),
            reload: UpgradeTrack::new(),
            health: UpgradeTrack::new(),
        }
    }

    fn track(&self, kind: UpgradeKind) -> UpgradeTrack {
        match kind {
            UpgradeKind::Damage => self.damage,
            UpgradeKind::Range => self.range,
            UpgradeKind::Reload => self.reload,
            UpgradeKind::Health => self.health,
        }
    }

    fn track_mut(&mut self, kind: UpgradeKind) -> &mut UpgradeTrack {
        match kind {
            UpgradeKind::Damage => &mut self.damage,
            UpgradeKind::Range => &mut self.range,
            UpgradeKind::Reload => &mut self.reload,
            UpgradeKind::Health => &mut self.health,
        }
    }
}

#[derive(Debug, Default)]
struct TacticalFlags {
    wall: bool,
    tower: bool,
    moat: bool,
    defenders: bool,
}

#[derive(Debug)]
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        let seed = if seed == 0 { 0x9e37_79b9_7f4a_7c15 } else { seed };
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn next_unit(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / ((1u64 << 53) as f64);
        let value = self.next_u64() >> 11;
        (value as f64) * SCALE
    }
}
