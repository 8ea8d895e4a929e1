//! Character — общее боевое состояние игрока и врагов.
//!
//! Health, death flag, attack cooldown and the immutable per-character config.
//! All transitions here are pure: side effects (VFX, physics switch, animation
//! triggers, session notifications) are dispatched by the combat systems from the
//! returned outcomes.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::DeathHook;
use crate::error::CombatError;
use crate::layers;

/// Per-character configuration, fixed at creation.
#[derive(Debug, Clone, PartialEq, Deserialize, Reflect)]
#[serde(default)]
pub struct CharacterConfig {
    /// Starting health; reaching zero kills the character.
    pub max_health: f32,
    /// Movement speed (consumed by movement/input, not by combat).
    pub move_speed: f32,
    /// Seconds between attacks (cooldown set when an attack begins).
    pub attack_wait: f32,
    /// Sphere-cast reach of the melee hit (meters).
    pub attack_distance: f32,
    pub damage_power: f32,
    /// Collision groups this character's attacks can hit (bits of `layers`).
    pub target_layers: u32,
    /// Collision group this character belongs to.
    pub layer: u32,
    /// Hurtbox radius.
    pub body_radius: f32,
    /// Time from attack start to the hit callback (animation event).
    pub hit_delay: f32,
    /// Cooldown at spawn (0 = ready immediately).
    pub initial_cooldown: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            move_speed: 40.0,
            attack_wait: 1.2,
            attack_distance: 1.5,
            damage_power: 20.0,
            target_layers: layers::PLAYER.bits(),
            layer: layers::ENEMY.bits(),
            body_radius: 0.5,
            hit_delay: 0.35,
            initial_cooldown: 0.0,
        }
    }
}

impl CharacterConfig {
    /// Player preset: lives on the player layer, hits enemies.
    pub fn player() -> Self {
        Self {
            target_layers: layers::ENEMY.bits(),
            layer: layers::PLAYER.bits(),
            ..Default::default()
        }
    }

    /// Enemy preset: lives on the enemy layer, hits the player.
    pub fn enemy() -> Self {
        Self::default()
    }

    /// Fail-fast validation (вызывается при создании Character).
    pub fn validate(&self) -> Result<(), CombatError> {
        let positive = [("max_health", self.max_health), ("body_radius", self.body_radius)];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CombatError::InvalidConfig { field, value });
            }
        }

        let non_negative = [
            ("move_speed", self.move_speed),
            ("attack_wait", self.attack_wait),
            ("attack_distance", self.attack_distance),
            ("damage_power", self.damage_power),
            ("hit_delay", self.hit_delay),
            ("initial_cooldown", self.initial_cooldown),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CombatError::InvalidConfig { field, value });
            }
        }

        // Hit callback must land inside the attack window
        if self.hit_delay > self.attack_wait {
            return Err(CombatError::InvalidConfig {
                field: "hit_delay",
                value: self.hit_delay,
            });
        }

        Ok(())
    }

    /// `validate` + layer sides for `kind`: player lives on PLAYER and hits ENEMY,
    /// enemies live on ENEMY and hit PLAYER.
    ///
    /// `Default` is the enemy preset, so a player config with omitted layers
    /// fails here instead of spawning a hero nobody can touch.
    pub fn validate_for(&self, kind: CharacterKind) -> Result<(), CombatError> {
        self.validate()?;

        let (own, opponent) = match kind {
            CharacterKind::Player => (layers::PLAYER, layers::ENEMY),
            CharacterKind::Enemy { .. } => (layers::ENEMY, layers::PLAYER),
        };
        if layers::group(self.layer) != own || !layers::group(self.target_layers).intersects(opponent) {
            return Err(CombatError::LayerMismatch {
                kind,
                layer: self.layer,
                target_layers: self.target_layers,
            });
        }

        Ok(())
    }
}

/// Category tag of a character.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Reflect)]
pub enum CharacterKind {
    /// The single UI-tracked character; health changes go to `GameSession`.
    Player,
    Enemy { score_reward: u32 },
}

impl CharacterKind {
    pub fn is_ui_tracked(&self) -> bool {
        matches!(self, CharacterKind::Player)
    }

    /// Category-specific death behaviour.
    pub fn default_death_hook(&self) -> DeathHook {
        match *self {
            CharacterKind::Player => DeathHook::EndMatch,
            CharacterKind::Enemy { score_reward } => DeathHook::Reward { score: score_reward },
        }
    }
}

/// Why a damage call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    AlreadyDead,
    MatchFinished,
}

/// Result of `Character::receive_damage`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Guard rejected the call: no health change, no effects, no notifications.
    Ignored(IgnoredReason),
    /// Damage applied. `damage` is the sanitized amount, `health` the post-clamp value.
    Applied { damage: f32, health: f32, died: bool },
}

impl DamageOutcome {
    pub fn died(&self) -> bool {
        matches!(self, DamageOutcome::Applied { died: true, .. })
    }
}

/// Боевое состояние персонажа.
///
/// Инварианты:
/// - `is_dead ⇒ health_points == 0`
/// - `is_dead` переходит false → true ровно один раз
/// - `health_points` только уменьшается
///
/// Fields are private: `receive_damage` is the only writer of health and death.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Character {
    config: CharacterConfig,
    kind: CharacterKind,
    health_points: f32,
    is_dead: bool,
    attack_cooldown_remaining: f32,
}

impl Character {
    pub fn new(config: CharacterConfig, kind: CharacterKind) -> Result<Self, CombatError> {
        config.validate_for(kind)?;

        Ok(Self {
            health_points: config.max_health,
            is_dead: false,
            attack_cooldown_remaining: config.initial_cooldown,
            config,
            kind,
        })
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    pub fn health_points(&self) -> f32 {
        self.health_points
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn attack_cooldown_remaining(&self) -> f32 {
        self.attack_cooldown_remaining
    }

    /// Cooldown elapsed (`<= 0`, the timer may have overshot below zero).
    pub fn cooldown_ready(&self) -> bool {
        self.attack_cooldown_remaining <= 0.0
    }

    pub fn can_attack(&self) -> bool {
        !self.is_dead && self.cooldown_ready()
    }

    /// Per-tick update.
    ///
    /// Cooldown decays even while dead; only the movement-speed signal is skipped.
    /// Returns the movement-speed signal for the animator (`None` when dead).
    pub fn update(&mut self, dt: f32, linear_velocity: Vec3) -> Option<f32> {
        if self.attack_cooldown_remaining > 0.0 {
            // Без clamp: таймер может уйти чуть ниже нуля на один тик
            self.attack_cooldown_remaining -= dt;
        }

        if self.is_dead {
            None
        } else {
            Some(linear_velocity.length())
        }
    }

    /// Start an attack if allowed; resets the cooldown to `attack_wait`.
    pub fn begin_attack(&mut self, session_finished: bool) -> bool {
        if session_finished || !self.can_attack() {
            return false;
        }

        self.attack_cooldown_remaining = self.config.attack_wait;
        true
    }

    /// Apply incoming damage.
    ///
    /// Guard first (dead / match finished → `Ignored`), then subtract, clamp to zero
    /// and die. Negative or non-finite amounts count as zero.
    pub fn receive_damage(&mut self, amount: f32, session_finished: bool) -> DamageOutcome {
        if self.is_dead {
            return DamageOutcome::Ignored(IgnoredReason::AlreadyDead);
        }
        if session_finished {
            return DamageOutcome::Ignored(IgnoredReason::MatchFinished);
        }

        let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        self.health_points -= amount;

        let died = self.health_points <= 0.0;
        if died {
            self.set_dead();
        }

        DamageOutcome::Applied {
            damage: amount,
            health: self.health_points,
            died,
        }
    }

    fn set_dead(&mut self) {
        self.health_points = 0.0;
        self.is_dead = true;
    }
}
