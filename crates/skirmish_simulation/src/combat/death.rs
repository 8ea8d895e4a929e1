//! Category-specific death behaviour.
//!
//! Base death (health 0, sensor collider, kinematic body, Dead trigger) is the same
//! for everyone; `DeathHook` adds what differs per category.

use bevy::prelude::*;

use crate::combat::{SpawnVfx, VfxKind};
use crate::session::{GameSession, MatchResult};

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum DeathHook {
    #[default]
    None,
    /// Player: матч проигран.
    EndMatch,
    /// Enemy: score + reward effect at the corpse.
    Reward { score: u32 },
}

/// Run `hook` right after the death transition.
pub fn run_death_hook(
    hook: DeathHook,
    position: Vec3,
    session: &mut GameSession,
    vfx: &mut EventWriter<SpawnVfx>,
) {
    match hook {
        DeathHook::None => {}
        DeathHook::EndMatch => session.finish(MatchResult::Defeat),
        DeathHook::Reward { score } => {
            session.add_score(score);
            vfx.write(SpawnVfx {
                kind: VfxKind::DeathReward,
                position,
            });
        }
    }
}
