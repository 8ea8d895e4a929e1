//! Hit resolution: attack → sphere cast → damage request
//!
//! Архитектура:
//! - `SpatialQuery` — контракт spatial-сервиса (nearest hit, category mask)
//! - `HurtboxQuery` — headless реализация поверх `Hurtbox` + rapier `CollisionGroups`
//! - `attack_check_hit` — чистая функция, не зависит от backend'а
//!
//! Один вызов = максимум одна цель (ближайший hit, не area sweep).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionGroups, Group, Sensor};

use crate::combat::{AttackCheckHit, DamageRequest};
use crate::components::Character;
use crate::layers;

/// Radius of the melee sphere cast (meters).
pub const ATTACK_CAST_RADIUS: f32 = 0.5;

/// Where the attack comes from: graphics origin + forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facing {
    pub origin: Vec3,
    pub forward: Dir3,
}

impl Facing {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            origin: transform.translation,
            forward: transform.forward(),
        }
    }
}

/// Sphere swept along a direction up to `max_distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereCast {
    pub origin: Vec3,
    pub direction: Dir3,
    pub radius: f32,
    pub max_distance: f32,
}

impl SphereCast {
    /// Distance travelled before touching a sphere at `center`.
    ///
    /// Starting overlap counts as a hit at distance 0, but only for targets
    /// ahead of the origin (center not behind the cast plane).
    pub fn distance_to(&self, center: Vec3, target_radius: f32) -> Option<f32> {
        let reach = self.radius + target_radius;
        let to_center = center - self.origin;
        let b = to_center.dot(*self.direction);

        let c = to_center.length_squared() - reach * reach;
        if c <= 0.0 {
            return (b >= 0.0).then_some(0.0);
        }

        // Ray vs sphere с радиусом reach (direction нормализован)
        if b <= 0.0 {
            return None;
        }

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let distance = b - discriminant.sqrt();
        (distance <= self.max_distance).then_some(distance)
    }
}

/// Spatial query service.
///
/// Returns the nearest entity whose layer intersects `mask`, never `exclude`.
pub trait SpatialQuery {
    fn cast(&self, cast: &SphereCast, mask: Group, exclude: Entity) -> Option<Entity>;
}

/// Hittable body volume.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hurtbox {
    pub radius: f32,
}

/// Snapshot of one hurtbox, backend-independent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HurtboxProbe {
    pub entity: Entity,
    pub center: Vec3,
    pub radius: f32,
    pub layers: Group,
}

/// Nearest probe hit by `cast`. Ties go to the lower entity index (deterministic).
pub fn nearest_hit(
    probes: impl IntoIterator<Item = HurtboxProbe>,
    cast: &SphereCast,
    mask: Group,
    exclude: Entity,
) -> Option<Entity> {
    let mut best: Option<(f32, Entity)> = None;

    for probe in probes {
        if probe.entity == exclude || !probe.layers.intersects(mask) {
            continue;
        }
        let Some(distance) = cast.distance_to(probe.center, probe.radius) else {
            continue;
        };

        let closer = match best {
            None => true,
            Some((best_distance, best_entity)) => {
                distance < best_distance
                    || (distance == best_distance && probe.entity.index() < best_entity.index())
            }
        };
        if closer {
            best = Some((distance, probe.entity));
        }
    }

    best.map(|(_, entity)| entity)
}

impl SpatialQuery for [HurtboxProbe] {
    fn cast(&self, cast: &SphereCast, mask: Group, exclude: Entity) -> Option<Entity> {
        nearest_hit(self.iter().copied(), cast, mask, exclude)
    }
}

/// Headless spatial backend: every solid `Hurtbox` in the world.
///
/// Sensor colliders (corpses) are skipped: a dead body never blocks a hit aimed
/// at someone standing behind it.
#[derive(SystemParam)]
pub struct HurtboxQuery<'w, 's> {
    hurtboxes: Query<
        'w,
        's,
        (Entity, &'static Transform, &'static Hurtbox, &'static CollisionGroups),
        Without<Sensor>,
    >,
}

impl SpatialQuery for HurtboxQuery<'_, '_> {
    fn cast(&self, cast: &SphereCast, mask: Group, exclude: Entity) -> Option<Entity> {
        let probes = self
            .hurtboxes
            .iter()
            .map(|(entity, transform, hurtbox, groups)| HurtboxProbe {
                entity,
                center: transform.translation,
                radius: hurtbox.radius,
                layers: groups.memberships,
            });
        nearest_hit(probes, cast, mask, exclude)
    }
}

/// Resolve one attack into at most one damage request.
///
/// Dead attackers never hit.
pub fn attack_check_hit<Q: SpatialQuery + ?Sized>(
    attacker: Entity,
    character: &Character,
    facing: Facing,
    spatial: &Q,
) -> Option<DamageRequest> {
    if character.is_dead() {
        return None;
    }

    let config = character.config();
    let cast = SphereCast {
        origin: facing.origin,
        direction: facing.forward,
        radius: ATTACK_CAST_RADIUS,
        max_distance: config.attack_distance,
    };

    let target = spatial.cast(&cast, layers::group(config.target_layers), attacker)?;

    Some(DamageRequest {
        attacker,
        target,
        amount: config.damage_power,
    })
}

/// System: `AttackCheckHit` → spatial query → `DamageRequest`.
pub fn resolve_attack_hits(
    mut hits: EventReader<AttackCheckHit>,
    attackers: Query<(&Character, &Transform)>,
    spatial: HurtboxQuery,
    mut requests: EventWriter<DamageRequest>,
) {
    for hit in hits.read() {
        let Ok((character, transform)) = attackers.get(hit.attacker) else {
            crate::logger::log_warning(&format!(
                "AttackCheckHit: attacker {:?} has no Character",
                hit.attacker
            ));
            continue;
        };

        if character.is_dead() {
            crate::logger::log(&format!(
                "AttackCheckHit ignored: attacker {:?} is dead",
                hit.attacker
            ));
            continue;
        }

        let facing = Facing::from_transform(transform);
        if let Some(request) = attack_check_hit(hit.attacker, character, facing, &spatial) {
            crate::logger::log(&format!(
                "💥 Hit: {:?} → {:?} ({:.1} damage)",
                request.attacker, request.target, request.amount
            ));
            requests.write(request);
        }
    }
}
