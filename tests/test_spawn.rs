use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use void_raiders::compute::init_world;
use void_raiders::entities::{
    EnemySkin, GameOverCause, GameStatus, MovementPattern, PowerUpKind, ENEMY_SIZE,
};
use void_raiders::spawn::{make_enemy, Spawner, UPGRADE_THRESHOLDS};

const W: f32 = 1280.0;
const H: f32 = 720.0;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn power_up_kinds(world: &void_raiders::entities::World) -> Vec<PowerUpKind> {
    world.power_ups.iter().map(|p| p.kind).collect()
}

// ── make_enemy ────────────────────────────────────────────────────────────────

#[test]
fn low_score_enemies_are_always_straight() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let e = make_enemy(0, W, 0, &mut rng);
        assert_eq!(e.pattern, MovementPattern::Straight);
        assert_ne!(e.skin, EnemySkin::Warden);
        assert!(e.x >= 0.0 && e.x < W - ENEMY_SIZE);
        assert_eq!(e.y, 0.0);
    }
}

#[test]
fn pattern_mix_opens_up_at_fifty_points() {
    let mut rng = seeded_rng();
    let seen: HashSet<MovementPattern> =
        (0..300).map(|_| make_enemy(50, W, 0, &mut rng).pattern).collect();
    assert_eq!(seen.len(), 3);
}

#[test]
fn regular_skins_cover_the_whole_set() {
    let mut rng = seeded_rng();
    let seen: HashSet<EnemySkin> =
        (0..500).map(|_| make_enemy(0, W, 0, &mut rng).skin).collect();
    let expected: HashSet<EnemySkin> = [
        EnemySkin::Zombie,
        EnemySkin::Skeleton,
        EnemySkin::Creeper,
        EnemySkin::Evoker,
        EnemySkin::Vex,
    ]
    .into_iter()
    .collect();
    assert_eq!(seen, expected);
}

#[test]
fn warden_fraction_approximates_thirty_percent_inside_the_zone() {
    let mut rng = seeded_rng();
    let trials = 10_000;
    let wardens = (0..trials)
        .filter(|_| make_enemy(5_001, W, 0, &mut rng).skin == EnemySkin::Warden)
        .count();
    let fraction = wardens as f64 / trials as f64;
    assert!(
        (0.27..0.33).contains(&fraction),
        "warden fraction {fraction} outside sampling tolerance"
    );
}

#[test]
fn no_wardens_outside_the_zone_boundaries() {
    let mut rng = seeded_rng();
    for _ in 0..2_000 {
        assert_ne!(make_enemy(4_999, W, 0, &mut rng).skin, EnemySkin::Warden);
        assert_ne!(make_enemy(10_000, W, 0, &mut rng).skin, EnemySkin::Warden);
    }
}

#[test]
fn degenerate_canvas_spawns_at_the_left_edge() {
    let mut rng = seeded_rng();
    // Canvas narrower than the enemy: no panic, column degenerates to 0
    for _ in 0..50 {
        let e = make_enemy(0, ENEMY_SIZE - 10.0, 0, &mut rng);
        assert_eq!(e.x, 0.0);
    }
    // Same for a warden, whose box is wider still
    for _ in 0..200 {
        let e = make_enemy(5_001, 100.0, 0, &mut rng);
        assert!(e.x >= 0.0);
    }
}

#[test]
fn degenerate_canvas_drops_power_ups_at_the_left_edge() {
    let mut world = init_world(30.0, 720.0); // narrower than a power-up
    let mut spawner = Spawner::new(0);
    let mut rng = seeded_rng();

    spawner.run(&mut world, 15_000, &mut rng);
    let multiplier = world
        .power_ups
        .iter()
        .find(|p| p.kind == PowerUpKind::ScoreMultiplier)
        .expect("multiplier drops even on a tiny canvas");
    assert_eq!(multiplier.x, 0.0);
}

// ── Spawner intervals ─────────────────────────────────────────────────────────

#[test]
fn enemy_source_fires_after_one_full_interval() {
    let mut world = init_world(W, H);
    let mut spawner = Spawner::new(0);
    let mut rng = seeded_rng();

    spawner.run(&mut world, 999, &mut rng);
    assert!(world.enemies.is_empty());

    spawner.run(&mut world, 1_000, &mut rng);
    assert_eq!(world.enemies.len(), 1);
    assert_eq!(world.enemies[0].y, 0.0);
}

#[test]
fn enemy_source_rearms_after_firing() {
    let mut world = init_world(W, H);
    let mut spawner = Spawner::new(0);
    let mut rng = seeded_rng();

    spawner.run(&mut world, 1_000, &mut rng);
    spawner.run(&mut world, 1_001, &mut rng);
    spawner.run(&mut world, 1_999, &mut rng);
    assert_eq!(world.enemies.len(), 1);

    spawner.run(&mut world, 2_000, &mut rng);
    assert_eq!(world.enemies.len(), 2);
}

#[test]
fn power_up_sources_fire_on_their_own_intervals() {
    let mut world = init_world(W, H);
    let mut spawner = Spawner::new(0);
    let mut rng = seeded_rng();

    spawner.run(&mut world, 15_000, &mut rng);
    assert!(power_up_kinds(&world).contains(&PowerUpKind::ScoreMultiplier));
    assert!(!power_up_kinds(&world).contains(&PowerUpKind::Booster));

    spawner.run(&mut world, 20_000, &mut rng);
    assert!(power_up_kinds(&world).contains(&PowerUpKind::Booster));
    assert!(!power_up_kinds(&world).contains(&PowerUpKind::ScoreMultiplier2));

    spawner.run(&mut world, 25_000, &mut rng);
    assert!(power_up_kinds(&world).contains(&PowerUpKind::ScoreMultiplier2));
}

// ── Heart gating ──────────────────────────────────────────────────────────────

#[test]
fn heart_does_not_drop_at_full_lives() {
    let mut world = init_world(W, H); // lives start at 10
    let mut spawner = Spawner::new(0);
    let mut rng = seeded_rng();

    spawner.run(&mut world, 10_000, &mut rng);
    assert!(!power_up_kinds(&world).contains(&PowerUpKind::Heart));
}

#[test]
fn heart_drops_when_lives_are_low_at_fire_time() {
    let mut world = init_world(W, H);
    let mut spawner = Spawner::new(0);
    let mut rng = seeded_rng();

    // First due time passes at full lives: timer re-arms without a drop
    spawner.run(&mut world, 10_000, &mut rng);
    assert!(!power_up_kinds(&world).contains(&PowerUpKind::Heart));

    // The gate is evaluated fresh at the next fire time
    world.lives = 4;
    spawner.run(&mut world, 20_000, &mut rng);
    assert!(power_up_kinds(&world).contains(&PowerUpKind::Heart));
}

// ── Bullet-upgrade one-shots ──────────────────────────────────────────────────

#[test]
fn upgrade_drops_once_when_threshold_first_met() {
    let mut world = init_world(W, H);
    let mut spawner = Spawner::new(0);
    let mut rng = seeded_rng();

    world.score = 600;
    spawner.run(&mut world, 1_000, &mut rng);
    assert!(power_up_kinds(&world).contains(&PowerUpKind::UpgradeBullet1));
    assert!(world.upgrade_spawned[0]);

    // Repeated polls never duplicate the drop
    spawner.run(&mut world, 2_000, &mut rng);
    spawner.run(&mut world, 3_000, &mut rng);
    let upgrades = power_up_kinds(&world)
        .iter()
        .filter(|k| **k == PowerUpKind::UpgradeBullet1)
        .count();
    assert_eq!(upgrades, 1);
}

#[test]
fn upgrades_below_their_threshold_stay_unspawned() {
    let mut world = init_world(W, H);
    let mut spawner = Spawner::new(0);
    let mut rng = seeded_rng();

    world.score = UPGRADE_THRESHOLDS[0] - 1;
    spawner.run(&mut world, 1_000, &mut rng);
    assert!(power_up_kinds(&world)
        .iter()
        .all(|k| !matches!(k, PowerUpKind::UpgradeBullet1)));
    assert_eq!(world.upgrade_spawned, [false; 4]);
}

#[test]
fn a_score_jump_releases_every_pending_tier_on_one_poll() {
    let mut world = init_world(W, H);
    let mut spawner = Spawner::new(0);
    let mut rng = seeded_rng();

    world.score = 2_500;
    spawner.run(&mut world, 1_000, &mut rng);
    let kinds = power_up_kinds(&world);
    assert!(kinds.contains(&PowerUpKind::UpgradeBullet1));
    assert!(kinds.contains(&PowerUpKind::UpgradeBullet2));
    assert!(kinds.contains(&PowerUpKind::UpgradeBullet3));
    assert!(kinds.contains(&PowerUpKind::UpgradeBullet4));
    assert_eq!(world.upgrade_spawned, [true; 4]);
}

// ── Terminal state ────────────────────────────────────────────────────────────

#[test]
fn spawner_is_inert_once_the_session_is_over() {
    let mut world = init_world(W, H);
    let mut spawner = Spawner::new(0);
    let mut rng = seeded_rng();

    world.status = GameStatus::Over(GameOverCause::Crashed);
    spawner.run(&mut world, 60_000, &mut rng);
    assert!(world.enemies.is_empty());
    assert!(world.power_ups.is_empty());
}
