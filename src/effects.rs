//! Power-up pickup effects and their timed expiry.

use crate::entities::{
    BulletTier, PowerUpKind, World, BASE_FIRE_COOLDOWN_MS, PLAYER_BASE_SPEED,
};

pub const BOOSTER_SPEED: f32 = 40.0;
pub const BOOSTER_FIRE_COOLDOWN_MS: u64 = 10;
pub const BOOSTER_DURATION_MS: u64 = 5_000;

pub const MULTIPLIER_BONUS: u32 = 100;
pub const MULTIPLIER2_BONUS: u32 = 250;

/// Apply a picked-up power-up to the world.
///
/// Both score multipliers grant a flat bonus only; neither arms the
/// `score_multiplier_active` flag consulted by kill scoring.
pub fn apply_power_up(world: &mut World, kind: PowerUpKind, now_ms: u64) {
    match kind {
        PowerUpKind::Booster => {
            world.booster_active = true;
            world.booster_end_ms = now_ms + BOOSTER_DURATION_MS;
            world.player.speed = BOOSTER_SPEED;
            world.player.fire_cooldown_ms = BOOSTER_FIRE_COOLDOWN_MS;
        }
        PowerUpKind::ScoreMultiplier => world.score += MULTIPLIER_BONUS,
        PowerUpKind::ScoreMultiplier2 => world.score += MULTIPLIER2_BONUS,
        PowerUpKind::UpgradeBullet1 => upgrade(world, 0, BulletTier::Charge1),
        PowerUpKind::UpgradeBullet2 => upgrade(world, 1, BulletTier::Charge2),
        PowerUpKind::UpgradeBullet3 => upgrade(world, 2, BulletTier::Charge3),
        PowerUpKind::UpgradeBullet4 => upgrade(world, 3, BulletTier::Charge4),
        PowerUpKind::Heart => world.lives += 1,
    }
}

/// Idempotent when the flag is already set.
fn upgrade(world: &mut World, slot: usize, tier: BulletTier) {
    world.upgrade_spawned[slot] = true;
    world.player.bullet_tier = tier;
}

/// Revert the booster once its end time has passed.  A plain time check
/// against the stored end time, run every frame, never an event.
pub fn expire_booster(world: &mut World, now_ms: u64) {
    if world.booster_active && now_ms >= world.booster_end_ms {
        world.booster_active = false;
        world.player.speed = PLAYER_BASE_SPEED;
        world.player.fire_cooldown_ms = BASE_FIRE_COOLDOWN_MS;
    }
}
