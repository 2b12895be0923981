//! World construction, input edges and the per-frame step.
//!
//! All timing comes in through `now_ms` (session clock, milliseconds) and
//! `dt` (elapsed time in 60 Hz reference frames), so the whole loop can be
//! driven by a simulated clock under test.  `frame` owns the per-frame
//! order; the spawner runs between frames on the same timeline.

use crate::collision;
use crate::effects;
use crate::entities::{
    EnemySkin, GameOverCause, GameStatus, Player, World, ZoneAlert,
};
use crate::spawn::{PATTERN_MIX_SCORE, WARDEN_ZONE};

pub const BACKGROUND_SPEED: f32 = 2.0;
pub const STARTING_LIVES: u32 = 10;
pub const KILL_SCORE: u32 = 10;
pub const KILL_SCORE_MULTIPLIED: u32 = 20;

/// Build a fresh session for the given canvas.  Restart means calling
/// this again — a finished world is never revived in place.
pub fn init_world(width: f32, height: f32) -> World {
    World {
        player: Player::new(width, height),
        bullets: Vec::new(),
        enemies: Vec::new(),
        power_ups: Vec::new(),
        enemy_bullets: Vec::new(),
        score: 0,
        lives: STARTING_LIVES,
        status: GameStatus::Running,
        booster_active: false,
        booster_end_ms: 0,
        score_multiplier_active: false,
        score_multiplier_end_ms: 0,
        upgrade_spawned: [false; 4],
        background_y: 0.0,
        zone_alert: ZoneAlert::new(),
        width,
        height,
    }
}

// ── Input edges ──────────────────────────────────────────────────────────────
//
// Steering is level-triggered: key-down sets the intent, key-up clears it.
// The caller re-asserts the held direction every frame.

pub fn steer_left(world: &mut World) {
    world.player.dx = -world.player.speed;
}

pub fn steer_right(world: &mut World) {
    world.player.dx = world.player.speed;
}

pub fn steer_stop(world: &mut World) {
    world.player.dx = 0.0;
}

/// Handle a fire request; a no-op inside the cooldown window.
pub fn player_fire(world: &mut World, now_ms: u64) {
    if world.status != GameStatus::Running {
        return;
    }
    if let Some(bullet) = world.player.fire(now_ms) {
        world.bullets.push(bullet);
    }
}

// ── Per-frame step ───────────────────────────────────────────────────────────

/// Advance the session by one frame.  A no-op once the session is over;
/// terminal causes stop the step where they occur.
pub fn frame(world: &mut World, now_ms: u64, dt: f32) {
    if world.status != GameStatus::Running {
        return;
    }

    // 1. Scroll the background, wrapping at one canvas height.
    world.background_y += BACKGROUND_SPEED * dt;
    if world.background_y >= world.height {
        world.background_y = 0.0;
    }

    // 2. Player.
    world.player.advance(dt, world.width);
    let player_box = world.player.aabb();

    // 3. Bullets: move, trade hits with enemies, drop the off-screen rest.
    for bullet in &mut world.bullets {
        bullet.advance(dt);
    }
    let (spent, killed) = collision::bullet_enemy_hits(&world.bullets, &world.enemies);
    if !killed.is_empty() {
        let per_kill = if world.score_multiplier_active {
            KILL_SCORE_MULTIPLIED
        } else {
            KILL_SCORE
        };
        world.score += killed.len() as u32 * per_kill;
        world.enemies = world
            .enemies
            .iter()
            .enumerate()
            .filter(|(i, _)| !killed.contains(i))
            .map(|(_, e)| e.clone())
            .collect();
        world.bullets = world
            .bullets
            .iter()
            .enumerate()
            .filter(|(i, _)| !spent.contains(i))
            .map(|(_, b)| b.clone())
            .collect();
    }
    world.bullets.retain(|b| !b.is_offscreen());

    // 4. Enemies: move and fire, then check the player, then leak lives
    //    for any that slipped past the bottom.
    let mut shots = Vec::new();
    for enemy in &mut world.enemies {
        enemy.advance(dt);
        if let Some(shot) = enemy.maybe_fire(now_ms) {
            shots.push(shot);
        }
    }
    world.enemy_bullets.extend(shots);

    if world.enemies.iter().any(|e| e.aabb().intersects(&player_box)) {
        world.status = GameStatus::Over(GameOverCause::Crashed);
        return;
    }

    let height = world.height;
    let before = world.enemies.len();
    world.enemies.retain(|e| !e.is_past_bottom(height));
    let escaped = (before - world.enemies.len()) as u32;
    world.lives = world.lives.saturating_sub(escaped);
    if world.lives == 0 {
        world.status = GameStatus::Over(GameOverCause::OutOfLives);
        return;
    }

    // 5. Enemy bullets.
    for shot in &mut world.enemy_bullets {
        shot.advance(dt);
    }
    if world
        .enemy_bullets
        .iter()
        .any(|s| s.aabb().intersects(&player_box))
    {
        world.status = GameStatus::Over(GameOverCause::ShotDown);
        return;
    }
    world.enemy_bullets.retain(|s| !s.is_past_bottom(height));

    // 6. Power-ups: move, consume on contact, drop the rest off the bottom.
    let mut kept = Vec::with_capacity(world.power_ups.len());
    for mut power_up in std::mem::take(&mut world.power_ups) {
        power_up.advance(dt);
        if power_up.aabb().intersects(&player_box) {
            effects::apply_power_up(world, power_up.kind, now_ms);
        } else if !power_up.is_past_bottom(height) {
            kept.push(power_up);
        }
    }
    world.power_ups = kept;

    // 7. Timed modifier expiry.
    effects::expire_booster(world, now_ms);

    // 8. Warden-zone banner oscillates only while the zone is active.
    if WARDEN_ZONE.contains(&world.score) {
        world.zone_alert.step(dt);
    }

    // 9. Stage re-skin pass.  Only the creeper has a stage-two entry and
    //    it maps to itself, matching the shipped skin set.
    if world.score > PATTERN_MIX_SCORE {
        for enemy in &mut world.enemies {
            enemy.skin = stage_skin(enemy.skin);
        }
    }
}

/// Stage-two skin table.
fn stage_skin(skin: EnemySkin) -> EnemySkin {
    match skin {
        EnemySkin::Creeper => EnemySkin::Creeper,
        other => other,
    }
}
