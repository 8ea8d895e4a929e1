//! One-shot visual effects (fire-and-forget)
//!
//! ECS только пишет `SpawnVfx`; инстанцирование ассетов — на стороне клиента.
//! `VfxJournal` is the headless consumer: it counts what would have been spawned.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum VfxKind {
    /// Character took damage
    Hit,
    /// Enemy died (reward burst)
    DeathReward,
}

/// Событие: spawn effect at a world position.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SpawnVfx {
    pub kind: VfxKind,
    pub position: Vec3,
}

#[derive(Resource, Debug, Default)]
pub struct VfxJournal {
    pub hits: u32,
    pub rewards: u32,
    pub last_position: Option<Vec3>,
}

impl VfxJournal {
    pub fn total(&self) -> u32 {
        self.hits + self.rewards
    }
}

/// System: drain `SpawnVfx` into the journal.
pub fn record_vfx(mut events: EventReader<SpawnVfx>, mut journal: ResMut<VfxJournal>) {
    for event in events.read() {
        match event.kind {
            VfxKind::Hit => journal.hits += 1,
            VfxKind::DeathReward => journal.rewards += 1,
        }
        journal.last_position = Some(event.position);
    }
}
