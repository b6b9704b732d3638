use std::time::Duration;

use glam::Vec2;
use lane_defence_core::{Command, EnemyId, EnemyProfile, EnemyState, Event, LaneIndex};
use lane_defence_system_combat::{Combat, Config};
use lane_defence_world::{self as world, query, World};

#[test]
fn overlapping_colliders_damage_once_per_swing() {
    let mut world = armed_world();
    let enemy = spawn_at_sword(&mut world, 200);

    let hero = query::hero(&world);
    assert_eq!(
        query::enemy_colliders_within(&world, hero.sword_hitbox, hero.attack_range),
        vec![enemy, enemy],
        "body and trigger both overlap the sword"
    );

    let mut combat = Combat::new(&Config::default());
    let events = swing(&mut world, &mut combat, Duration::from_millis(300));

    let damaged: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::EnemyDamaged {
                enemy: target,
                amount,
                change,
            } if *target == enemy => Some((*amount, change.current)),
            _ => None,
        })
        .collect();
    assert_eq!(damaged, vec![(50, 150)]);
    assert_eq!(snapshot(&world, enemy).health, 150);
}

#[test]
fn repeated_swings_kill_and_then_skip_the_corpse() {
    let mut world = armed_world();
    let enemy = spawn_at_sword(&mut world, 100);
    let mut combat = Combat::new(&Config::default());

    let first = swing(&mut world, &mut combat, Duration::from_millis(300));
    assert!(first.contains(&Event::EnemyHurt { enemy }));
    assert_eq!(snapshot(&world, enemy).state, EnemyState::Hurting);

    let second = swing(&mut world, &mut combat, Duration::from_millis(300));
    assert!(second.contains(&Event::EnemyDied {
        enemy,
        lane: LaneIndex::new(2),
        boss: false,
    }));

    let third = swing(&mut world, &mut combat, Duration::from_millis(300));
    assert!(third
        .iter()
        .any(|event| matches!(event, Event::HeroAttacked { .. })));
    assert!(!third
        .iter()
        .any(|event| matches!(event, Event::EnemyDamaged { .. })));
}

#[test]
fn upgraded_damage_flows_into_swings() {
    let mut world = armed_world();
    let enemy = spawn_at_sword(&mut world, 500);
    let mut events = Vec::new();
    world::apply(&mut world, Command::UpgradeHeroDamage, &mut events);
    world::apply(&mut world, Command::UpgradeHeroDamage, &mut events);
    assert_eq!(query::hero(&world).damage, 100);

    let mut combat = Combat::new(&Config::default());
    let _ = swing(&mut world, &mut combat, Duration::from_millis(300));
    assert_eq!(snapshot(&world, enemy).health, 400);
}

fn armed_world() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartSpawning, &mut events);
    world::apply(
        &mut world,
        Command::SetHeroAttacking { enabled: true },
        &mut events,
    );
    world
}

fn spawn_at_sword(world: &mut World, health: u32) -> EnemyId {
    let origin: Vec2 = query::hero(world).sword_hitbox;
    let mut events = Vec::new();
    world::apply(
        world,
        Command::SpawnEnemy {
            lane: LaneIndex::new(2),
            origin,
            profile: EnemyProfile {
                health,
                speed: 0.0,
                boss: false,
                scale: 1.0,
                tint: None,
            },
        },
        &mut events,
    );
    match events.as_slice() {
        [Event::EnemySpawned { enemy, .. }] => *enemy,
        other => panic!("unexpected spawn events: {other:?}"),
    }
}

fn swing(world: &mut World, combat: &mut Combat, dt: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt }, &mut events);

    let hero = query::hero(world);
    let enemies = query::enemy_view(world);
    let mut commands = Vec::new();
    combat.handle(
        &events,
        true,
        &hero,
        &enemies,
        |center, radius| query::enemy_colliders_within(world, center, radius),
        &mut commands,
    );

    let mut generated = Vec::new();
    for command in commands {
        world::apply(world, command, &mut generated);
    }
    generated
}

fn snapshot(world: &World, enemy: EnemyId) -> lane_defence_core::EnemySnapshot {
    *query::enemy_view(world)
        .get(enemy)
        .expect("enemy still present")
}
