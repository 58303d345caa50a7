#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Castle Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Castle Defence.";

/// Upper bound applied to every tick delta before the simulation advances.
///
/// Large deltas accumulated while the host was suspended would otherwise
/// teleport enemies and drain cooldowns in a single step.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Describes the active phase of the game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Title screen; the simulation is idle.
    Menu,
    /// Live simulation with waves, combat and resource accumulation.
    Playing,
    /// Paused while the player picks a tactical level-up reward.
    LevelUp,
    /// Castle destroyed; final results are available for presentation.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Configures the playing field using the provided dimensions.
    ConfigureField {
        /// Horizontal extent of the field in world units.
        width: f32,
        /// Vertical extent of the field in world units.
        height: f32,
    },
    /// Starts a fresh session, resetting per-session state.
    StartGame,
    /// Returns the session to the title screen.
    ReturnToMenu,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a new enemy of the given kind enter the field.
    SpawnEnemy {
        /// Kind of enemy to spawn.
        kind: EnemyKind,
    },
    /// Requests that the castle fire one projectile per tower at the target.
    FireVolley {
        /// Enemy the volley is aimed at.
        target: EnemyId,
    },
    /// Requests that a defender be displaced by the provided offsets.
    MoveDefender {
        /// Identifier of the defender attempting to move.
        defender: DefenderId,
        /// Horizontal displacement in world units.
        dx: f32,
        /// Vertical displacement in world units.
        dy: f32,
    },
    /// Requests that a defender strike an enemy within its reach.
    StrikeEnemy {
        /// Identifier of the striking defender.
        defender: DefenderId,
        /// Enemy receiving the strike.
        target: EnemyId,
    },
    /// Announces that the wave director opened a new wave.
    BeginWave {
        /// Number of enemies the new wave will spawn in total.
        enemies_to_spawn: u32,
    },
    /// Requests payout for a fully cleared wave.
    CompleteWave,
    /// Requests a permanent stat upgrade purchase.
    PurchaseUpgrade {
        /// Upgrade to purchase.
        kind: UpgradeKind,
    },
    /// Applies the chosen tactical level-up reward and resumes play.
    ChooseReward {
        /// Reward selected by the player.
        reward: TacticalReward,
    },
    /// Grants the fixed coin bonus provided by the external ad collaborator.
    GrantBonusCoins,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Clamped duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active after processing commands.
        phase: GamePhase,
    },
    /// Confirms that the playing field was reconfigured.
    FieldConfigured {
        /// Dimensions now in effect.
        bounds: FieldBounds,
    },
    /// Confirms that a fresh session started.
    GameStarted,
    /// Announces that a new wave opened.
    WaveStarted {
        /// One-based wave number.
        wave: u32,
        /// Number of enemies the wave will spawn.
        enemies_to_spawn: u32,
    },
    /// Confirms that an enemy entered the field.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Kind of the spawned enemy.
        kind: EnemyKind,
        /// Top-left position the enemy occupies after spawning.
        position: FieldPoint,
    },
    /// Announces that the castle finished reloading and may fire a volley.
    CastleVolleyReady,
    /// Confirms that a projectile left the castle.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Standard or critical grade of the shot.
        kind: ProjectileKind,
        /// Enemy the projectile is aimed at.
        target: EnemyId,
    },
    /// Confirms that a projectile struck its target.
    ProjectileHit {
        /// Identifier of the projectile that connected.
        projectile: ProjectileId,
        /// Enemy that was struck.
        target: EnemyId,
        /// Damage applied by the hit.
        damage: f32,
    },
    /// Reports that a projectile expired without further effect.
    ProjectileExpired {
        /// Identifier of the expired projectile.
        projectile: ProjectileId,
    },
    /// Announces that a defender finished reloading and may strike.
    DefenderReady {
        /// Identifier of the ready defender.
        defender: DefenderId,
    },
    /// Confirms that a defender struck an enemy.
    DefenderStruck {
        /// Identifier of the striking defender.
        defender: DefenderId,
        /// Enemy that was struck.
        target: EnemyId,
        /// Damage applied by the strike.
        damage: f32,
    },
    /// Confirms that an enemy died with reward credit.
    EnemyKilled {
        /// Identifier of the defeated enemy.
        enemy: EnemyId,
        /// Coins credited for the kill.
        reward: u32,
        /// Experience credited for the kill.
        experience: u32,
    },
    /// Reports that an enemy left the field past the far boundary.
    EnemyEscaped {
        /// Identifier of the escaped enemy.
        enemy: EnemyId,
    },
    /// Reports that an enemy reached the castle and spent itself against it.
    CastleStruck {
        /// Identifier of the enemy that reached the castle.
        enemy: EnemyId,
        /// Damage inflicted on the castle.
        damage: u32,
        /// Castle health remaining after the strike.
        remaining: f32,
    },
    /// Confirms that a wave was cleared and its reward paid out.
    WaveCompleted {
        /// Number of the wave that was cleared.
        wave: u32,
        /// Coins granted by the payout.
        coins: u32,
        /// Experience granted by the payout.
        experience: u32,
    },
    /// Confirms that a permanent upgrade purchase succeeded.
    UpgradePurchased {
        /// Upgrade that was purchased.
        kind: UpgradeKind,
        /// Level reached after the purchase.
        level: u32,
        /// Coins deducted by the purchase.
        price: u32,
        /// Coins remaining after the purchase.
        coins: u32,
    },
    /// Reports that a permanent upgrade purchase was rejected.
    UpgradeRejected {
        /// Upgrade that was requested.
        kind: UpgradeKind,
        /// Specific reason the purchase failed.
        reason: PurchaseError,
    },
    /// Announces that the player accumulated enough experience to level up.
    LevelReached {
        /// Level reached by the player.
        level: u32,
    },
    /// Confirms that a tactical level-up reward took effect.
    RewardApplied {
        /// Reward that was applied.
        reward: TacticalReward,
    },
    /// Confirms that the external ad collaborator's coin bonus was granted.
    BonusCoinsGranted {
        /// Coins added by the grant.
        amount: u32,
        /// Coin balance after the grant.
        coins: u32,
    },
    /// Announces that the castle fell and the session ended.
    GameEnded {
        /// Wave the session ended on.
        wave: u32,
        /// Final coin balance.
        coins: u32,
        /// Final experience balance.
        experience: u32,
    },
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of enemies that march against the castle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline infantry with balanced stats.
    Normal,
    /// Fragile runner that closes distance quickly.
    Fast,
    /// Slow bruiser with heavy health and damage.
    Tank,
}

impl EnemyKind {
    /// Every enemy kind in spawn-roll order.
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Normal, EnemyKind::Fast, EnemyKind::Tank];

    /// Returns the immutable stat record associated with the kind.
    #[must_use]
    pub const fn stats(self) -> EnemyStats {
        match self {
            Self::Normal => EnemyStats {
                health: 30.0,
                speed: 60.0,
                damage: 5,
                reward: 5,
                experience: 10,
                width: 64.0,
                height: 64.0,
            },
            Self::Fast => EnemyStats {
                health: 15.0,
                speed: 85.0,
                damage: 3,
                reward: 3,
                experience: 7,
                width: 64.0,
                height: 64.0,
            },
            Self::Tank => EnemyStats {
                health: 100.0,
                speed: 40.0,
                damage: 10,
                reward: 15,
                experience: 20,
                width: 96.0,
                height: 96.0,
            },
        }
    }
}

/// Immutable configuration record describing an enemy kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Starting and maximum health.
    pub health: f32,
    /// Leftward march speed in world units per second.
    pub speed: f32,
    /// Damage inflicted on the castle when the enemy reaches it.
    pub damage: u32,
    /// Coins credited when the enemy is killed.
    pub reward: u32,
    /// Experience credited when the enemy is killed.
    pub experience: u32,
    /// Collision width in world units.
    pub width: f32,
    /// Collision height in world units.
    pub height: f32,
}

/// Kinds of defenders summoned by the tactical reward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenderKind {
    /// Ranged unit that keeps a preferred distance band to its target.
    Archer,
    /// Melee unit that closes in on its target.
    Knight,
}

impl DefenderKind {
    /// Returns the immutable stat record associated with the kind.
    #[must_use]
    pub const fn stats(self) -> DefenderStats {
        match self {
            Self::Archer => DefenderStats {
                health: 50.0,
                damage: 3.0,
                attack_range: 150.0,
                attack_speed: 1.5,
                move_speed: 100.0,
                preferred_distance: 120.0,
                retreat_distance: 30.0,
                width: 40.0,
                height: 40.0,
            },
            Self::Knight => DefenderStats {
                health: 100.0,
                damage: 5.0,
                attack_range: 70.0,
                attack_speed: 1.0,
                move_speed: 70.0,
                preferred_distance: 40.0,
                retreat_distance: 20.0,
                width: 45.0,
                height: 45.0,
            },
        }
    }
}

/// Immutable configuration record describing a defender kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderStats {
    /// Starting and maximum health.
    pub health: f32,
    /// Damage applied per strike.
    pub damage: f32,
    /// Maximum strike distance in world units.
    pub attack_range: f32,
    /// Strikes attempted per second.
    pub attack_speed: f32,
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Distance the defender tries to keep to its target.
    pub preferred_distance: f32,
    /// Half-width of the tolerance band around the preferred distance.
    pub retreat_distance: f32,
    /// Collision width in world units.
    pub width: f32,
    /// Collision height in world units.
    pub height: f32,
}

/// Grade of a projectile fired by the castle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Regular shot at base damage.
    Standard,
    /// Critical shot with multiplied damage and a faster flight.
    Critical,
}

impl ProjectileKind {
    /// Flight speed of the projectile in world units per second.
    #[must_use]
    pub const fn speed(self) -> f32 {
        match self {
            Self::Standard => 500.0,
            Self::Critical => 600.0,
        }
    }

    /// Side length of the projectile's square collision box.
    #[must_use]
    pub const fn dimension(self) -> f32 {
        match self {
            Self::Standard => 20.0,
            Self::Critical => 25.0,
        }
    }
}

/// Permanent castle upgrades purchasable with coins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Raises projectile damage.
    Damage,
    /// Extends the castle's attack range.
    Range,
    /// Shortens the volley cooldown.
    Reload,
    /// Raises the castle's maximum health and heals it fully.
    Health,
}

impl UpgradeKind {
    /// Every purchasable upgrade in display order.
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::Damage,
        UpgradeKind::Range,
        UpgradeKind::Reload,
        UpgradeKind::Health,
    ];

    /// Returns the exponential price curve for the upgrade.
    #[must_use]
    pub const fn price_curve(self) -> PriceCurve {
        match self {
            Self::Damage => PriceCurve {
                base: 10,
                multiplier: 1.5,
            },
            Self::Range => PriceCurve {
                base: 15,
                multiplier: 1.6,
            },
            Self::Reload => PriceCurve {
                base: 12,
                multiplier: 1.5,
            },
            Self::Health => PriceCurve {
                base: 20,
                multiplier: 1.7,
            },
        }
    }
}

/// Exponential price curve evaluated per upgrade level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceCurve {
    /// Price at level zero.
    pub base: u32,
    /// Growth factor applied once per owned level.
    pub multiplier: f32,
}

impl PriceCurve {
    /// Price of the next purchase given the currently owned level.
    #[must_use]
    pub fn price(&self, level: u32) -> u32 {
        let scaled = self.base as f32 * self.multiplier.powi(level as i32);
        scaled.floor() as u32
    }
}

/// Tactical rewards offered at every level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TacticalReward {
    /// Reinforces the wall: +50% maximum castle health, fully healed.
    Wall,
    /// Adds one tower, firing one extra projectile per volley.
    Tower,
    /// Digs a moat that halves every enemy's speed for the session.
    Moat,
    /// Summons a defender squad in front of the castle.
    Defenders,
}

impl TacticalReward {
    /// Every tactical reward in offer order.
    pub const ALL: [TacticalReward; 4] = [
        TacticalReward::Wall,
        TacticalReward::Tower,
        TacticalReward::Moat,
        TacticalReward::Defenders,
    ];
}

/// Reasons a permanent upgrade purchase may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PurchaseError {
    /// The player cannot afford the upgrade at its current price.
    #[error("not enough coins: the upgrade costs {price} but only {coins} are available")]
    InsufficientFunds {
        /// Price that was asked.
        price: u32,
        /// Coins that were available.
        coins: u32,
    },
}

/// Location on the playing field expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldPoint {
    x: f32,
    y: f32,
}

impl FieldPoint {
    /// Creates a new field point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the point.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate of the point.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance between two field points.
    #[must_use]
    pub fn distance_to(self, other: FieldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldRect {
    origin: FieldPoint,
    width: f32,
    height: f32,
}

impl FieldRect {
    /// Constructs a rectangle from its top-left corner and dimensions.
    #[must_use]
    pub const fn from_origin_and_size(origin: FieldPoint, width: f32, height: f32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Top-left corner that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> FieldPoint {
        self.origin
    }

    /// Horizontal extent of the rectangle.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent of the rectangle.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn center(&self) -> FieldPoint {
        FieldPoint::new(
            self.origin.x() + self.width / 2.0,
            self.origin.y() + self.height / 2.0,
        )
    }

    /// Reports whether two rectangles overlap.
    #[must_use]
    pub fn intersects(&self, other: &FieldRect) -> bool {
        self.origin.x() < other.origin.x() + other.width
            && self.origin.x() + self.width > other.origin.x()
            && self.origin.y() < other.origin.y() + other.height
            && self.origin.y() + self.height > other.origin.y()
    }
}

/// Dimensions of the playing field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    width: f32,
    height: f32,
}

impl FieldBounds {
    /// Creates a new field bounds descriptor.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Horizontal extent of the field in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent of the field in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Reports whether the point lies inside the field inflated by `margin`.
    #[must_use]
    pub fn contains_with_margin(&self, point: FieldPoint, margin: f32) -> bool {
        point.x() >= -margin
            && point.x() <= self.width + margin
            && point.y() >= -margin
            && point.y() <= self.height + margin
    }
}

/// Target selected for the castle's next volley.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackTarget {
    /// Enemy chosen as the volley target.
    pub enemy: EnemyId,
    /// Distance from the castle anchor to the enemy's center.
    pub distance: f32,
}

/// Immutable representation of the castle's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastleSnapshot {
    /// Current health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Base damage applied by each projectile.
    pub damage: f32,
    /// Maximum targeting distance from the castle anchor.
    pub attack_range: f32,
    /// Volleys attempted per second.
    pub attack_speed: f32,
    /// Time remaining until the next volley.
    pub ready_in: Duration,
    /// Probability that a projectile rolls critical.
    pub critical_chance: f32,
    /// Damage factor applied to critical projectiles.
    pub critical_multiplier: f32,
    /// Towers currently firing per volley.
    pub towers: u32,
    /// Upper bound on the tower count.
    pub max_towers: u32,
    /// Point volleys originate from and distances are measured against.
    pub anchor: FieldPoint,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Kind of the enemy.
    pub kind: EnemyKind,
    /// Top-left corner of the enemy's collision box.
    pub position: FieldPoint,
    /// Current health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Indicates whether the enemy is individually slowed.
    pub slowed: bool,
}

impl EnemySnapshot {
    /// Collision rectangle occupied by the enemy.
    #[must_use]
    pub fn bounding(&self) -> FieldRect {
        let stats = self.kind.stats();
        FieldRect::from_origin_and_size(self.position, stats.width, stats.height)
    }

    /// Center of the enemy's collision rectangle.
    #[must_use]
    pub fn center(&self) -> FieldPoint {
        self.bounding().center()
    }
}

/// Read-only snapshot describing all live enemies on the field.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single defender's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderSnapshot {
    /// Unique identifier assigned to the defender.
    pub id: DefenderId,
    /// Kind of the defender.
    pub kind: DefenderKind,
    /// Top-left corner of the defender's collision box.
    pub position: FieldPoint,
    /// Anchor the defender returns to when idle.
    pub spawn: FieldPoint,
    /// Current health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Time remaining until the next strike.
    pub ready_in: Duration,
}

impl DefenderSnapshot {
    /// Center of the defender's collision rectangle.
    #[must_use]
    pub fn center(&self) -> FieldPoint {
        let stats = self.kind.stats();
        FieldPoint::new(
            self.position.x() + stats.width / 2.0,
            self.position.y() + stats.height / 2.0,
        )
    }
}

/// Read-only snapshot describing all live defenders on the field.
#[derive(Clone, Debug, Default)]
pub struct DefenderView {
    snapshots: Vec<DefenderSnapshot>,
}

impl DefenderView {
    /// Creates a new defender view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<DefenderSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured defender snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &DefenderSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<DefenderSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Standard or critical grade of the shot.
    pub kind: ProjectileKind,
    /// Top-left corner of the projectile's collision box.
    pub position: FieldPoint,
    /// Enemy the projectile is locked onto.
    pub target: EnemyId,
    /// Damage the projectile applies on impact.
    pub damage: f32,
    /// Distance traveled since launch.
    pub traveled: f32,
}

impl ProjectileSnapshot {
    /// Collision rectangle occupied by the projectile.
    #[must_use]
    pub fn bounding(&self) -> FieldRect {
        let side = self.kind.dimension();
        FieldRect::from_origin_and_size(self.position, side, side)
    }
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the player's session resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceSnapshot {
    /// Coin balance.
    pub coins: u32,
    /// Experience accumulated toward the next level.
    pub experience: u32,
    /// Current player level.
    pub level: u32,
    /// Experience required to reach the next level.
    pub experience_goal: u32,
    /// Current wave number.
    pub wave: u32,
}

/// Immutable representation of one permanent upgrade track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpgradeSnapshot {
    /// Upgrade the track describes.
    pub kind: UpgradeKind,
    /// Levels purchased so far.
    pub level: u32,
    /// Cumulative stat multiplier applied by the purchases.
    pub multiplier: f32,
    /// Price of the next purchase.
    pub price: u32,
}

/// Immutable record of which tactical rewards were taken this session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TacticalSnapshot {
    /// Whether the wall reinforcement was applied.
    pub wall: bool,
    /// Whether an extra tower was claimed.
    pub tower: bool,
    /// Whether the moat was dug.
    pub moat: bool,
    /// Whether a defender squad was summoned.
    pub defenders: bool,
}

#[cfg(test)]
mod tests {
    use super::{
        DefenderId, EnemyId, EnemyKind, FieldBounds, FieldPoint, FieldRect, ProjectileId,
        ProjectileKind, PurchaseError, TacticalReward, UpgradeKind,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn identifiers_round_trip_through_bincode() {
        assert_round_trip(&EnemyId::new(42));
        assert_round_trip(&DefenderId::new(7));
        assert_round_trip(&ProjectileId::new(1_000));
    }

    #[test]
    fn kind_enums_round_trip_through_bincode() {
        assert_round_trip(&EnemyKind::Tank);
        assert_round_trip(&ProjectileKind::Critical);
        assert_round_trip(&UpgradeKind::Reload);
        assert_round_trip(&TacticalReward::Moat);
    }

    #[test]
    fn purchase_error_round_trips_through_bincode() {
        assert_round_trip(&PurchaseError::InsufficientFunds {
            price: 10,
            coins: 5,
        });
    }

    #[test]
    fn enemy_stats_match_kind_table() {
        let normal = EnemyKind::Normal.stats();
        assert_eq!(normal.health, 30.0);
        assert_eq!(normal.reward, 5);
        assert_eq!(normal.experience, 10);

        let tank = EnemyKind::Tank.stats();
        assert_eq!(tank.health, 100.0);
        assert_eq!(tank.damage, 10);
    }

    #[test]
    fn price_curve_floors_exponential_growth() {
        let curve = UpgradeKind::Damage.price_curve();
        assert_eq!(curve.price(0), 10);
        assert_eq!(curve.price(1), 15);
        assert_eq!(curve.price(2), 22);
        assert_eq!(curve.price(3), 33);

        let range = UpgradeKind::Range.price_curve();
        assert_eq!(range.price(0), 15);
        assert_eq!(range.price(1), 24);
    }

    #[test]
    fn distance_matches_expectation() {
        let origin = FieldPoint::new(0.0, 0.0);
        let other = FieldPoint::new(3.0, 4.0);
        assert_eq!(origin.distance_to(other), 5.0);
        assert_eq!(other.distance_to(origin), 5.0);
    }

    #[test]
    fn rects_overlap_when_interpenetrating() {
        let a = FieldRect::from_origin_and_size(FieldPoint::new(0.0, 0.0), 10.0, 10.0);
        let b = FieldRect::from_origin_and_size(FieldPoint::new(9.0, 9.0), 10.0, 10.0);
        let c = FieldRect::from_origin_and_size(FieldPoint::new(10.0, 0.0), 5.0, 5.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c), "touching edges do not overlap");
    }

    #[test]
    fn bounds_margin_extends_containment() {
        let bounds = FieldBounds::new(100.0, 50.0);
        assert!(bounds.contains_with_margin(FieldPoint::new(-20.0, 25.0), 25.0));
        assert!(!bounds.contains_with_margin(FieldPoint::new(-30.0, 25.0), 25.0));
        assert!(bounds.contains_with_margin(FieldPoint::new(120.0, 70.0), 25.0));
    }

    #[test]
    fn projectile_kind_table_matches_grades() {
        assert_eq!(ProjectileKind::Standard.speed(), 500.0);
        assert_eq!(ProjectileKind::Critical.speed(), 600.0);
        assert!(ProjectileKind::Critical.dimension() > ProjectileKind::Standard.dimension());
    }
}
