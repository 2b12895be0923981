//! Time-driven creation of enemies and power-ups.
//!
//! Each source keeps its own due time, mirroring a bank of independent
//! fixed-interval timers on the loop's cooperative timeline.  `run` fires
//! every source that has come due and re-arms it; all randomness comes
//! through the injected RNG so tests can seed it.

use std::ops::Range;

use rand::Rng;

use crate::entities::{
    Enemy, EnemySkin, GameStatus, MovementPattern, PowerUp, PowerUpKind, World, ENEMY_SIZE,
    POWER_UP_SIZE,
};

pub const ENEMY_INTERVAL_MS: u64 = 1_000;
pub const BOOSTER_INTERVAL_MS: u64 = 20_000;
pub const MULTIPLIER_INTERVAL_MS: u64 = 15_000;
pub const MULTIPLIER2_INTERVAL_MS: u64 = 25_000;
pub const HEART_INTERVAL_MS: u64 = 10_000;
pub const UPGRADE_POLL_INTERVAL_MS: u64 = 1_000;

/// Hearts only drop while the player holds fewer lives than this.
pub const HEART_LIVES_CAP: u32 = 5;

/// Score window in which wardens can appear.
pub const WARDEN_ZONE: Range<u32> = 5_000..10_000;
/// Chance that a spawn tick inside the warden zone produces a warden.
pub const WARDEN_CHANCE: f64 = 0.3;

/// Score at which enemies start mixing movement patterns.
pub const PATTERN_MIX_SCORE: u32 = 50;

/// Bullet-upgrade score thresholds, in tier order.
pub const UPGRADE_THRESHOLDS: [u32; 4] = [500, 1_000, 1_500, 2_000];

const PATTERNS: [MovementPattern; 3] = [
    MovementPattern::Straight,
    MovementPattern::Sinusoidal,
    MovementPattern::Zigzag,
];

const SKINS: [EnemySkin; 5] = [
    EnemySkin::Zombie,
    EnemySkin::Skeleton,
    EnemySkin::Creeper,
    EnemySkin::Evoker,
    EnemySkin::Vex,
];

const UPGRADES: [PowerUpKind; 4] = [
    PowerUpKind::UpgradeBullet1,
    PowerUpKind::UpgradeBullet2,
    PowerUpKind::UpgradeBullet3,
    PowerUpKind::UpgradeBullet4,
];

/// Due times for every spawn source.  Created alongside the world and
/// discarded with it; a restarted session gets a fresh one.
#[derive(Clone, Debug)]
pub struct Spawner {
    next_enemy_ms: u64,
    next_booster_ms: u64,
    next_multiplier_ms: u64,
    next_multiplier2_ms: u64,
    next_heart_ms: u64,
    next_upgrade_poll_ms: u64,
}

impl Spawner {
    /// Every source first fires one full interval after `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Spawner {
            next_enemy_ms: now_ms + ENEMY_INTERVAL_MS,
            next_booster_ms: now_ms + BOOSTER_INTERVAL_MS,
            next_multiplier_ms: now_ms + MULTIPLIER_INTERVAL_MS,
            next_multiplier2_ms: now_ms + MULTIPLIER2_INTERVAL_MS,
            next_heart_ms: now_ms + HEART_INTERVAL_MS,
            next_upgrade_poll_ms: now_ms + UPGRADE_POLL_INTERVAL_MS,
        }
    }

    /// Fire every source that has come due.  Inert once the session is
    /// over.
    pub fn run(&mut self, world: &mut World, now_ms: u64, rng: &mut impl Rng) {
        if world.status != GameStatus::Running {
            return;
        }

        if now_ms >= self.next_enemy_ms {
            let enemy = make_enemy(world.score, world.width, now_ms, rng);
            world.enemies.push(enemy);
            self.next_enemy_ms = now_ms + ENEMY_INTERVAL_MS;
        }

        if now_ms >= self.next_booster_ms {
            drop_power_up(world, PowerUpKind::Booster, rng);
            self.next_booster_ms = now_ms + BOOSTER_INTERVAL_MS;
        }

        if now_ms >= self.next_multiplier_ms {
            drop_power_up(world, PowerUpKind::ScoreMultiplier, rng);
            self.next_multiplier_ms = now_ms + MULTIPLIER_INTERVAL_MS;
        }

        if now_ms >= self.next_multiplier2_ms {
            drop_power_up(world, PowerUpKind::ScoreMultiplier2, rng);
            self.next_multiplier2_ms = now_ms + MULTIPLIER2_INTERVAL_MS;
        }

        // The heart timer re-arms whether or not it drops anything; the
        // lives gate is evaluated fresh at fire time.
        if now_ms >= self.next_heart_ms {
            if world.lives < HEART_LIVES_CAP {
                drop_power_up(world, PowerUpKind::Heart, rng);
            }
            self.next_heart_ms = now_ms + HEART_INTERVAL_MS;
        }

        if now_ms >= self.next_upgrade_poll_ms {
            for (slot, &threshold) in UPGRADE_THRESHOLDS.iter().enumerate() {
                if world.score >= threshold && !world.upgrade_spawned[slot] {
                    world.upgrade_spawned[slot] = true;
                    drop_power_up(world, UPGRADES[slot], rng);
                }
            }
            self.next_upgrade_poll_ms = now_ms + UPGRADE_POLL_INTERVAL_MS;
        }
    }
}

/// Roll one enemy for the current score.
///
/// Inside the warden zone there is a 30% chance of a warden; otherwise a
/// regular enemy whose pattern is mixed only once the score has passed
/// `PATTERN_MIX_SCORE`.
pub fn make_enemy(score: u32, canvas_width: f32, now_ms: u64, rng: &mut impl Rng) -> Enemy {
    let x = spawn_x(canvas_width, ENEMY_SIZE, rng);

    if WARDEN_ZONE.contains(&score) && rng.gen_bool(WARDEN_CHANCE) {
        return Enemy::warden(x, 0.0, now_ms);
    }

    let pattern = if score >= PATTERN_MIX_SCORE {
        PATTERNS[rng.gen_range(0..PATTERNS.len())]
    } else {
        MovementPattern::Straight
    };
    let skin = SKINS[rng.gen_range(0..SKINS.len())];
    Enemy::new(x, 0.0, pattern, skin, now_ms)
}

fn drop_power_up(world: &mut World, kind: PowerUpKind, rng: &mut impl Rng) {
    let x = spawn_x(world.width, POWER_UP_SIZE, rng);
    world.power_ups.push(PowerUp::new(kind, x));
}

/// Uniform spawn column in `[0, canvas_width - entity_width)`.  A canvas
/// narrower than the entity degenerates to x = 0 instead of handing
/// `gen_range` an empty range.
fn spawn_x(canvas_width: f32, entity_width: f32, rng: &mut impl Rng) -> f32 {
    let max = canvas_width - entity_width;
    if max > 0.0 {
        rng.gen_range(0.0..max)
    } else {
        0.0
    }
}
