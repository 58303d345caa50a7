#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Castle Defence adapters.
//!
//! The simulation core never draws; it exposes snapshots and events, and
//! adapters translate those into a [`Scene`] that any [`RenderingBackend`]
//! can present. The contract stays free of backend specifics so headless
//! drivers and graphical clients share one seam.

use anyhow::Result as AnyResult;
use castle_defence_core::{
    Command, DefenderId, DefenderKind, EnemyId, EnemyKind, GamePhase, ProjectileId,
    ProjectileKind, TacticalReward, UpgradeKind, UpgradeSnapshot,
};
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Player intents gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Whether the player asked to start or restart a session.
    pub start_game: bool,
    /// Whether the player asked to return to the title screen.
    pub return_to_menu: bool,
    /// Permanent upgrade the player asked to purchase this frame.
    pub purchase: Option<UpgradeKind>,
    /// Tactical reward the player picked on the level-up screen.
    pub reward_choice: Option<TacticalReward>,
    /// Whether the player finished the rewarded bonus and claims its coins.
    pub claim_bonus: bool,
    /// Whether the adapter detected a quit request.
    pub quit: bool,
}

impl FrameInput {
    /// Translates the captured intents into world commands.
    ///
    /// Quit requests stay with the adapter; every other intent maps onto the
    /// command surface one to one.
    #[must_use]
    pub fn into_commands(self) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.start_game {
            commands.push(Command::StartGame);
        }
        if self.return_to_menu {
            commands.push(Command::ReturnToMenu);
        }
        if let Some(kind) = self.purchase {
            commands.push(Command::PurchaseUpgrade { kind });
        }
        if let Some(reward) = self.reward_choice {
            commands.push(Command::ChooseReward { reward });
        }
        if self.claim_bonus {
            commands.push(Command::GrantBonusCoins);
        }
        commands
    }
}

/// Playing field descriptor for the scene background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPresentation {
    /// Horizontal extent of the field in world units.
    pub width: f32,
    /// Vertical extent of the field in world units.
    pub height: f32,
    /// Solid color painted behind all entities.
    pub background: Color,
}

impl FieldPresentation {
    /// Creates a new field descriptor, validating its dimensions.
    pub fn new(width: f32, height: f32, background: Color) -> Result<Self, RenderingError> {
        if !(width > 0.0) || !(height > 0.0) {
            return Err(RenderingError::InvalidFieldSize { width, height });
        }

        Ok(Self {
            width,
            height,
            background,
        })
    }
}

/// Castle descriptor with everything a backend draws around the keep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastlePresentation {
    /// Anchor the castle fires from, in world units.
    pub anchor: Vec2,
    /// Fraction of health remaining in the range 0.0..=1.0.
    pub health_ratio: f32,
    /// Current attack range for the range indicator.
    pub attack_range: f32,
    /// Towers firing per volley.
    pub towers: u32,
}

/// Enemy descriptor positioned by its collision-box center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Kind of the enemy, selecting its sprite.
    pub kind: EnemyKind,
    /// Center of the enemy in world units.
    pub center: Vec2,
    /// Collision-box dimensions in world units.
    pub size: Vec2,
    /// Fraction of health remaining in the range 0.0..=1.0.
    pub health_ratio: f32,
    /// Whether the enemy is being slowed, tinting its sprite.
    pub slowed: bool,
}

/// Defender descriptor positioned by its collision-box center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderPresentation {
    /// Identifier of the defender.
    pub id: DefenderId,
    /// Kind of the defender, selecting its sprite.
    pub kind: DefenderKind,
    /// Center of the defender in world units.
    pub center: Vec2,
    /// Fraction of health remaining in the range 0.0..=1.0.
    pub health_ratio: f32,
}

/// Projectile descriptor for the shot sprites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectilePresentation {
    /// Identifier of the projectile.
    pub id: ProjectileId,
    /// Grade of the shot, selecting sprite and size.
    pub kind: ProjectileKind,
    /// Top-left corner of the shot in world units.
    pub position: Vec2,
}

/// HUD model mirrored from the resource and upgrade queries.
#[derive(Clone, Debug, PartialEq)]
pub struct HudPresentation {
    /// Coin balance shown in the resource bar.
    pub coins: u32,
    /// Current player level.
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub experience: u32,
    /// Experience required to reach the next level.
    pub experience_goal: u32,
    /// Current wave number.
    pub wave: u32,
    /// Upgrade buttons with their current levels and prices.
    pub upgrades: Vec<UpgradeSnapshot>,
}

/// Scene description combining the field, its inhabitants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Playing field backdrop.
    pub field: FieldPresentation,
    /// Castle descriptor.
    pub castle: CastlePresentation,
    /// Enemies visible on the field.
    pub enemies: Vec<EnemyPresentation>,
    /// Defenders visible on the field.
    pub defenders: Vec<DefenderPresentation>,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectilePresentation>,
    /// HUD resource and upgrade summary.
    pub hud: HudPresentation,
    /// Phase driving which screen a backend overlays.
    pub phase: GamePhase,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    #[allow(clippy::too_many_arguments)] // Scene construction intentionally enumerates every channel explicitly.
    pub fn new(
        field: FieldPresentation,
        castle: CastlePresentation,
        enemies: Vec<EnemyPresentation>,
        defenders: Vec<DefenderPresentation>,
        projectiles: Vec<ProjectilePresentation>,
        hud: HudPresentation,
        phase: GamePhase,
    ) -> Self {
        Self {
            field,
            castle,
            enemies,
            defenders,
            projectiles,
            hud,
            phase,
        }
    }

    /// Number of entities a backend would draw for this scene.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        1 + self.enemies.len() + self.defenders.len() + self.projectiles.len()
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Castle Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame
    /// delta and per-frame player input captured by the adapter, and may
    /// mutate the scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Clamps a health fraction into the drawable 0.0..=1.0 range.
#[must_use]
pub fn health_ratio(health: f32, max_health: f32) -> f32 {
    if max_health <= 0.0 {
        return 0.0;
    }
    (health / max_health).clamp(0.0, 1.0)
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Field dimensions must both be positive.
    InvalidFieldSize {
        /// Width that failed validation.
        width: f32,
        /// Height that failed validation.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFieldSize { width, height } => {
                write!(
                    f,
                    "field dimensions must be positive (received {width} x {height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FieldPresentation {
        FieldPresentation::new(1280.0, 720.0, Color::from_rgb_u8(30, 40, 30))
            .expect("positive dimensions")
    }

    fn hud() -> HudPresentation {
        HudPresentation {
            coins: 100,
            level: 1,
            experience: 0,
            experience_goal: 100,
            wave: 1,
            upgrades: Vec::new(),
        }
    }

    fn castle() -> CastlePresentation {
        CastlePresentation {
            anchor: Vec2::new(200.0, 360.0),
            health_ratio: 1.0,
            attack_range: 250.0,
            towers: 1,
        }
    }

    #[test]
    fn field_creation_rejects_non_positive_dimensions() {
        let error = FieldPresentation::new(0.0, 720.0, Color::from_rgb_u8(0, 0, 0))
            .expect_err("zero width must be rejected");
        assert!(matches!(error, RenderingError::InvalidFieldSize { .. }));

        let error = FieldPresentation::new(1280.0, -1.0, Color::from_rgb_u8(0, 0, 0))
            .expect_err("negative height must be rejected");
        assert!(matches!(
            error,
            RenderingError::InvalidFieldSize { height, .. } if height == -1.0,
        ));
    }

    #[test]
    fn scene_preserves_every_channel() {
        let enemies = vec![EnemyPresentation {
            id: EnemyId::new(3),
            kind: EnemyKind::Fast,
            center: Vec2::new(400.0, 300.0),
            size: Vec2::new(64.0, 64.0),
            health_ratio: 0.5,
            slowed: true,
        }];

        let scene = Scene::new(
            field(),
            castle(),
            enemies.clone(),
            Vec::new(),
            Vec::new(),
            hud(),
            GamePhase::Playing,
        );

        assert_eq!(scene.enemies, enemies);
        assert_eq!(scene.phase, GamePhase::Playing);
        assert!(scene.defenders.is_empty());
        assert_eq!(scene.entity_count(), 2, "the castle plus one enemy");
    }

    #[test]
    fn health_ratio_clamps_to_the_drawable_range() {
        assert_eq!(health_ratio(50.0, 100.0), 0.5);
        assert_eq!(health_ratio(-3.0, 100.0), 0.0);
        assert_eq!(health_ratio(140.0, 100.0), 1.0);
        assert_eq!(health_ratio(10.0, 0.0), 0.0);
    }

    #[test]
    fn frame_input_maps_onto_the_command_surface() {
        let input = FrameInput {
            start_game: true,
            purchase: Some(UpgradeKind::Damage),
            reward_choice: Some(TacticalReward::Moat),
            claim_bonus: true,
            ..FrameInput::default()
        };

        assert_eq!(
            input.into_commands(),
            vec![
                Command::StartGame,
                Command::PurchaseUpgrade {
                    kind: UpgradeKind::Damage,
                },
                Command::ChooseReward {
                    reward: TacticalReward::Moat,
                },
                Command::GrantBonusCoins,
            ],
        );

        assert!(FrameInput::default().into_commands().is_empty());
    }

    #[test]
    fn rendering_error_displays_its_dimensions() {
        let error = RenderingError::InvalidFieldSize {
            width: 0.0,
            height: 720.0,
        };
        assert_eq!(
            error.to_string(),
            "field dimensions must be positive (received 0 x 720)"
        );
    }
}
