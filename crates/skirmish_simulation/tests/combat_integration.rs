//! Combat integration tests
//!
//! Полный ECS pipeline: AttackIntent → Swing → AttackCheckHit → DamageRequest →
//! damage / death / session, с ручным шагом FixedUpdate.
//!
//! Проверяем:
//! - health clamp, death ровно один раз, guard'ы (dead / match finished)
//! - death side effects (sensor, kinematic body, Dead trigger, reward)
//! - один hit = максимум одна цель (ближайшая)
//! - cooldown timeline

use std::time::Duration;

use bevy::prelude::*;
use bevy_rapier3d::prelude::{RigidBody, Sensor, Velocity};
use skirmish_simulation::combat::Swing;
use skirmish_simulation::*;

/// Helper: combat App без MinimalPlugins, время двигаем руками
fn create_combat_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>().add_plugins(CombatPlugin);
    app
}

/// Helper: один FixedUpdate тик длиной `dt`
fn step(app: &mut App, dt: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(dt));
    app.world_mut().run_schedule(FixedUpdate);
}

fn spawn_player(app: &mut App) -> Entity {
    spawn_character(
        app.world_mut(),
        CharacterConfig::player(),
        CharacterKind::Player,
        Transform::IDENTITY,
    )
    .unwrap()
}

/// Enemy in front of the player (Bevy forward = -Z), facing back at it.
fn spawn_enemy(app: &mut App, z: f32, score_reward: u32) -> Entity {
    spawn_character(
        app.world_mut(),
        CharacterConfig::enemy(),
        CharacterKind::Enemy { score_reward },
        Transform::from_xyz(0.0, 0.0, z).looking_to(Vec3::Z, Vec3::Y),
    )
    .unwrap()
}

fn damage(app: &mut App, attacker: Entity, target: Entity, amount: f32) {
    app.world_mut().send_event(DamageRequest {
        attacker,
        target,
        amount,
    });
    step(app, 1.0 / 60.0);
}

fn character(app: &App, entity: Entity) -> &Character {
    app.world().get::<Character>(entity).unwrap()
}

fn dead_triggers(app: &App, entity: Entity) -> usize {
    app.world()
        .resource::<Events<AnimationTrigger>>()
        .iter_current_update_events()
        .filter(|event| event.entity == entity && event.trigger == AnimTrigger::Dead)
        .count()
}

fn died_events(app: &App, entity: Entity) -> usize {
    app.world()
        .resource::<Events<CharacterDied>>()
        .iter_current_update_events()
        .filter(|event| event.entity == entity)
        .count()
}

#[test]
fn test_five_hits_kill_enemy_once() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let enemy = spawn_enemy(&mut app, -1.5, 10);

    let mut history = Vec::new();
    for _ in 0..5 {
        damage(&mut app, player, enemy, 20.0);
        history.push(character(&app, enemy).health_points());
    }

    assert_eq!(history, vec![80.0, 60.0, 40.0, 20.0, 0.0]);
    assert!(character(&app, enemy).is_dead());

    // Шестой удар по трупу — ничего не происходит
    damage(&mut app, player, enemy, 20.0);
    assert_eq!(character(&app, enemy).health_points(), 0.0);

    let journal = app.world().resource::<VfxJournal>();
    assert_eq!(journal.hits, 5);
    assert_eq!(journal.rewards, 1);

    assert_eq!(dead_triggers(&app, enemy), 1);
    assert_eq!(died_events(&app, enemy), 1);
    assert_eq!(app.world().resource::<GameSession>().score(), 10);
    assert!(!app.world().resource::<GameSession>().is_finished());
}

#[test]
fn test_death_switches_body_to_sensor() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let enemy = spawn_enemy(&mut app, -1.5, 10);
    app.world_mut().get_mut::<Velocity>(enemy).unwrap().linvel = Vec3::new(1.0, 0.0, 2.0);

    damage(&mut app, player, enemy, 100.0);

    let world = app.world();
    assert!(world.get::<Sensor>(enemy).is_some());
    assert!(world.get::<Dead>(enemy).is_some());
    assert!(matches!(
        world.get::<RigidBody>(enemy),
        Some(RigidBody::KinematicPositionBased)
    ));
    assert_eq!(world.get::<Velocity>(enemy).unwrap().linvel, Vec3::ZERO);
}

#[test]
fn test_overkill_clamps_to_zero() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let enemy = spawn_enemy(&mut app, -1.5, 3);

    damage(&mut app, player, enemy, 150.0);

    assert_eq!(character(&app, enemy).health_points(), 0.0);
    assert!(character(&app, enemy).is_dead());
    assert_eq!(app.world().resource::<VfxJournal>().rewards, 1);
    assert_eq!(dead_triggers(&app, enemy), 1);
}

#[test]
fn test_only_player_reports_health() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let enemy = spawn_enemy(&mut app, -1.5, 10);

    damage(&mut app, player, enemy, 30.0);
    assert_eq!(app.world().resource::<GameSession>().health_reports(), 0);

    damage(&mut app, enemy, player, 30.0);
    damage(&mut app, enemy, player, 30.0);

    let session = app.world().resource::<GameSession>();
    assert_eq!(session.health_reports(), 2);
    assert_eq!(session.player_health(), Some(40.0));
}

#[test]
fn test_player_death_ends_match() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let enemy = spawn_enemy(&mut app, -1.5, 10);

    damage(&mut app, enemy, player, 250.0);

    let session = app.world().resource::<GameSession>();
    assert_eq!(session.result(), Some(MatchResult::Defeat));
    assert_eq!(session.player_health(), Some(0.0));
    // Player death: без reward-эффекта
    assert_eq!(app.world().resource::<VfxJournal>().rewards, 0);

    // После конца матча урон больше не проходит
    damage(&mut app, player, enemy, 20.0);
    assert_eq!(character(&app, enemy).health_points(), 100.0);
    assert_eq!(app.world().resource::<VfxJournal>().hits, 1);
}

#[test]
fn test_finished_match_ignores_damage() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let enemy = spawn_enemy(&mut app, -1.5, 10);

    app.world_mut()
        .resource_mut::<GameSession>()
        .finish(MatchResult::Victory);

    damage(&mut app, enemy, player, 40.0);

    assert_eq!(character(&app, player).health_points(), 100.0);
    let session = app.world().resource::<GameSession>();
    assert_eq!(session.health_reports(), 0);
    assert_eq!(app.world().resource::<VfxJournal>().total(), 0);
}

#[test]
fn test_duplicate_hit_callback_kills_once() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let enemy = spawn_enemy(&mut app, -1.5, 10);

    // Один удар добивает; второй callback в том же тике должен упереться в guard
    damage(&mut app, player, enemy, 90.0);
    app.world_mut().send_event(AttackCheckHit { attacker: player });
    app.world_mut().send_event(AttackCheckHit { attacker: player });
    step(&mut app, 1.0 / 60.0);

    assert!(character(&app, enemy).is_dead());
    let journal = app.world().resource::<VfxJournal>();
    assert_eq!(journal.hits, 2);
    assert_eq!(journal.rewards, 1);
    assert_eq!(dead_triggers(&app, enemy), 1);
    assert_eq!(app.world().resource::<GameSession>().score(), 10);
}

#[test]
fn test_hit_damages_only_nearest_enemy() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let far = spawn_enemy(&mut app, -2.4, 10);
    let near = spawn_enemy(&mut app, -1.4, 10);

    app.world_mut().send_event(AttackCheckHit { attacker: player });
    step(&mut app, 1.0 / 60.0);

    assert_eq!(character(&app, near).health_points(), 80.0);
    assert_eq!(character(&app, far).health_points(), 100.0);
    assert_eq!(app.world().resource::<VfxJournal>().hits, 1);
}

#[test]
fn test_enemy_behind_attacker_is_not_hit() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let behind = spawn_enemy(&mut app, 0.9, 10);
    let front = spawn_enemy(&mut app, -1.5, 10);

    app.world_mut().send_event(AttackCheckHit { attacker: player });
    step(&mut app, 1.0 / 60.0);

    assert_eq!(character(&app, behind).health_points(), 100.0);
    assert_eq!(character(&app, front).health_points(), 80.0);
}

#[test]
fn test_damage_dealt_reports_applied_amount() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let enemy = spawn_enemy(&mut app, -1.5, 10);

    damage(&mut app, player, enemy, f32::NAN);
    damage(&mut app, player, enemy, -15.0);
    damage(&mut app, player, enemy, 25.0);

    let dealt: Vec<f32> = app
        .world()
        .resource::<Events<DamageDealt>>()
        .iter_current_update_events()
        .map(|event| event.damage)
        .collect();
    assert_eq!(dealt, vec![0.0, 0.0, 25.0]);
    assert_eq!(character(&app, enemy).health_points(), 75.0);
}

#[test]
fn test_corpse_does_not_block_next_target() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let far = spawn_enemy(&mut app, -2.4, 10);
    let near = spawn_enemy(&mut app, -1.4, 10);

    damage(&mut app, player, near, 100.0);
    assert!(character(&app, near).is_dead());

    app.world_mut().send_event(AttackCheckHit { attacker: player });
    step(&mut app, 1.0 / 60.0);

    assert_eq!(character(&app, far).health_points(), 80.0);
}

#[test]
fn test_attack_skips_own_layer() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let enemy = spawn_enemy(&mut app, -1.5, 10);
    let ally = spawn_enemy(&mut app, -1.2, 10);

    // Ally стоит между врагом и игроком, но на слое Enemy
    app.world_mut()
        .entity_mut(ally)
        .insert(Transform::from_xyz(0.0, 0.0, -0.5));
    app.world_mut().send_event(AttackCheckHit { attacker: enemy });
    step(&mut app, 1.0 / 60.0);

    assert_eq!(character(&app, ally).health_points(), 100.0);
    assert_eq!(character(&app, player).health_points(), 80.0);
}

#[test]
fn test_attack_out_of_reach_misses() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let enemy = spawn_enemy(&mut app, -4.0, 10);

    app.world_mut().send_event(AttackCheckHit { attacker: player });
    step(&mut app, 1.0 / 60.0);

    assert_eq!(character(&app, enemy).health_points(), 100.0);
    assert_eq!(app.world().resource::<VfxJournal>().total(), 0);
}

#[test]
fn test_dead_attacker_cannot_attack() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    let enemy = spawn_enemy(&mut app, -1.5, 10);

    damage(&mut app, player, enemy, 100.0);

    app.world_mut().send_event(AttackIntent { attacker: enemy });
    app.world_mut().send_event(AttackCheckHit { attacker: enemy });
    step(&mut app, 1.0 / 60.0);

    assert!(app.world().get::<Swing>(enemy).is_none());
    assert_eq!(character(&app, player).health_points(), 100.0);
}

#[test]
fn test_attack_intent_hits_after_swing_delay() {
    let mut app = create_combat_app();
    let player = spawn_character(
        app.world_mut(),
        CharacterConfig {
            attack_wait: 1.0,
            hit_delay: 0.25,
            ..CharacterConfig::player()
        },
        CharacterKind::Player,
        Transform::IDENTITY,
    )
    .unwrap();
    let enemy = spawn_enemy(&mut app, -1.5, 10);

    app.world_mut().send_event(AttackIntent { attacker: player });
    step(&mut app, 0.1);

    assert!(app.world().get::<Swing>(player).is_some());
    assert_eq!(character(&app, player).attack_cooldown_remaining(), 1.0);

    step(&mut app, 0.1);
    assert_eq!(character(&app, enemy).health_points(), 100.0);

    step(&mut app, 0.1);
    assert_eq!(character(&app, enemy).health_points(), 80.0);
    assert!(app.world().get::<Swing>(player).is_none());
    assert!((character(&app, player).attack_cooldown_remaining() - 0.8).abs() < 1e-5);

    // Пока cooldown не истёк — новая атака отклоняется
    app.world_mut().send_event(AttackIntent { attacker: player });
    step(&mut app, 0.1);
    assert!(app.world().get::<Swing>(player).is_none());
}

#[test]
fn test_cooldown_decays_and_stops_below_zero() {
    let mut app = create_combat_app();
    let enemy = spawn_character(
        app.world_mut(),
        CharacterConfig {
            initial_cooldown: 0.7,
            ..CharacterConfig::enemy()
        },
        CharacterKind::Enemy { score_reward: 1 },
        Transform::IDENTITY,
    )
    .unwrap();

    step(&mut app, 0.5);
    assert!((character(&app, enemy).attack_cooldown_remaining() - 0.2).abs() < 1e-5);

    step(&mut app, 0.5);
    assert!((character(&app, enemy).attack_cooldown_remaining() + 0.3).abs() < 1e-5);

    step(&mut app, 0.5);
    assert!((character(&app, enemy).attack_cooldown_remaining() + 0.3).abs() < 1e-5);
    assert!(character(&app, enemy).can_attack());
}

#[test]
fn test_move_speed_signal_follows_velocity() {
    let mut app = create_combat_app();
    let player = spawn_player(&mut app);
    app.world_mut().get_mut::<Velocity>(player).unwrap().linvel = Vec3::new(3.0, 0.0, 4.0);

    step(&mut app, 1.0 / 60.0);

    let speed = app.world().get::<AnimatorParams>(player).unwrap().move_speed;
    assert!((speed - 5.0).abs() < 1e-5);
}

#[test]
fn test_spawn_without_combat_plugin_fails() {
    let mut world = World::new();
    let result = spawn_character(
        &mut world,
        CharacterConfig::player(),
        CharacterKind::Player,
        Transform::IDENTITY,
    );
    assert!(matches!(result, Err(CombatError::MissingCollaborator(_))));
}

#[test]
fn test_skirmish_runs_to_completion() {
    let mut app = create_headless_app(7);
    app.insert_resource(SkirmishDriver { attack_chance: 1.0 });
    let roster = Roster::default_roster().unwrap();
    let entities = spawn_roster(app.world_mut(), &roster).unwrap();

    for _ in 0..2000 {
        app.update();
        if app.world().resource::<GameSession>().is_finished() {
            break;
        }
    }

    let session = app.world().resource::<GameSession>();
    assert!(session.is_finished());

    // Health никогда не уходит ниже нуля
    for entity in entities {
        let character = app.world().get::<Character>(entity).unwrap();
        assert!(character.health_points() >= 0.0);
        assert_eq!(character.is_dead(), character.health_points() == 0.0);
    }
}
