//! Animator signals (ECS → animation backend)
//!
//! ECS пишет параметры и триггеры, анимационная система (Godot AnimationTree,
//! bevy_animation, headless `Swing`) их читает. Никаких ответов обратно,
//! кроме hit callback'а `AttackCheckHit`.

use bevy::prelude::*;

/// Persistent animator parameters (float-параметры blend tree).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AnimatorParams {
    /// Linear speed of the body, drives idle/walk/run blending.
    pub move_speed: f32,
}

/// One-shot animator triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AnimTrigger {
    Attack,
    Dead,
}

/// Событие: raise a trigger on the entity's animator.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnimationTrigger {
    pub entity: Entity,
    pub trigger: AnimTrigger,
}
