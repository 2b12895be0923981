//! Game entity types and their per-step motion rules.
//!
//! Entities are plain structs: each knows how to advance itself by one
//! step, report its bounding box and (for the firing kinds) emit a
//! projectile.  Spawning, collision resolution and scoring live in the
//! other modules.

use crate::collision::Aabb;

// ── Reference-rate constants ─────────────────────────────────────────────────
//
// Speeds are in pixels per 60 Hz reference frame.  Every `advance` takes a
// `dt` factor (1.0 = one reference frame) so motion stays consistent when
// frames run long.

pub const PLAYER_WIDTH: f32 = 100.0;
pub const PLAYER_HEIGHT: f32 = 80.0;
pub const PLAYER_BASE_SPEED: f32 = 8.0;
/// Gap between the player sprite and the bottom edge of the canvas.
pub const PLAYER_BOTTOM_MARGIN: f32 = 115.0;
pub const BASE_FIRE_COOLDOWN_MS: u64 = 100;

pub const BULLET_SIZE: f32 = 30.0;
pub const BULLET_SPEED: f32 = 7.0;

pub const ENEMY_SIZE: f32 = 50.0;
pub const ENEMY_SPEED: f32 = 3.0;
pub const CREEPER_FIRE_INTERVAL_MS: u64 = 2_000;

pub const WARDEN_WIDTH: f32 = 165.0;
pub const WARDEN_HEIGHT: f32 = 80.0;
pub const WARDEN_FIRE_INTERVAL_MS: u64 = 2_500;

pub const ENEMY_BULLET_SIZE: f32 = 20.0;
pub const ENEMY_BULLET_SPEED: f32 = 5.0;

pub const POWER_UP_SIZE: f32 = 40.0;
pub const POWER_UP_SPEED: f32 = 3.0;

/// Horizontal drift amplitude shared by the sinusoidal and zigzag patterns.
const DRIFT_AMPLITUDE: f32 = 2.0;
const SINE_PHASE_STEP: f32 = 0.1;
/// Vertical distance a zigzagging enemy covers between direction flips.
const ZIGZAG_LEG: f32 = 50.0;

// ── Player ───────────────────────────────────────────────────────────────────

/// Projectile appearance tier.  Upgraded once per score threshold via the
/// `UpgradeBulletN` power-ups; never downgrades.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletTier {
    Standard,
    Charge1,
    Charge2,
    Charge3,
    Charge4,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per reference frame while a direction key is held.
    pub speed: f32,
    /// Current horizontal intent: `-speed`, `0` or `+speed`.
    pub dx: f32,
    pub bullet_tier: BulletTier,
    /// Minimum gap between two successful shots.
    pub fire_cooldown_ms: u64,
    /// Time of the last successful shot; `None` until the first one.
    pub last_fire_ms: Option<u64>,
}

impl Player {
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        Player {
            x: canvas_width / 2.0 - PLAYER_WIDTH / 2.0,
            y: canvas_height - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_BASE_SPEED,
            dx: 0.0,
            bullet_tier: BulletTier::Standard,
            fire_cooldown_ms: BASE_FIRE_COOLDOWN_MS,
            last_fire_ms: None,
        }
    }

    /// Apply the current horizontal intent, clamped to the canvas.
    pub fn advance(&mut self, dt: f32, canvas_width: f32) {
        self.x = (self.x + self.dx * dt).clamp(0.0, canvas_width - self.width);
    }

    /// Spawn a bullet if the cooldown since the last successful shot has
    /// elapsed.  Calls inside the window are no-ops.
    pub fn fire(&mut self, now_ms: u64) -> Option<Bullet> {
        if let Some(last) = self.last_fire_ms {
            if now_ms.saturating_sub(last) < self.fire_cooldown_ms {
                return None;
            }
        }
        self.last_fire_ms = Some(now_ms);
        Some(Bullet {
            x: self.x + self.width / 2.0 - BULLET_SIZE / 2.0,
            y: self.y,
            tier: self.bullet_tier,
        })
    }

    pub fn aabb(&self) -> Aabb {
        Aabb { x: self.x, y: self.y, w: self.width, h: self.height }
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub tier: BulletTier,
}

impl Bullet {
    pub fn advance(&mut self, dt: f32) {
        self.y -= BULLET_SPEED * dt;
    }

    pub fn is_offscreen(&self) -> bool {
        self.y + BULLET_SIZE < 0.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb { x: self.x, y: self.y, w: BULLET_SIZE, h: BULLET_SIZE }
    }
}

/// What a firing enemy shoots — only affects the sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyShot {
    /// Creeper projectile.
    Tnt,
    /// Warden projectile.
    Sonic,
}

#[derive(Clone, Debug)]
pub struct EnemyBullet {
    pub x: f32,
    pub y: f32,
    pub shot: EnemyShot,
}

impl EnemyBullet {
    pub fn advance(&mut self, dt: f32) {
        self.y += ENEMY_BULLET_SPEED * dt;
    }

    pub fn is_past_bottom(&self, canvas_height: f32) -> bool {
        self.y > canvas_height
    }

    pub fn aabb(&self) -> Aabb {
        Aabb { x: self.x, y: self.y, w: ENEMY_BULLET_SIZE, h: ENEMY_BULLET_SIZE }
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Per-step rule for an enemy's horizontal drift while it descends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementPattern {
    Straight,
    Sinusoidal,
    Zigzag,
}

/// Visual rolled once per instance.  `Warden` only comes out of the warden
/// profile constructor, never the random skin roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemySkin {
    Zombie,
    Skeleton,
    Creeper,
    Evoker,
    Vex,
    Warden,
}

/// Fixed-interval fire state for the shooting variants; armed at spawn.
#[derive(Clone, Debug)]
pub struct FireControl {
    pub interval_ms: u64,
    pub last_fire_ms: u64,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub pattern: MovementPattern,
    pub skin: EnemySkin,
    /// Sine phase, advanced while the sinusoidal pattern runs.
    pub phase: f32,
    /// Zigzag state: current horizontal step and descent into the leg.
    pub drift_dir: f32,
    pub leg_travel: f32,
    /// Present on the firing variants (creeper skins and wardens).
    pub fire: Option<FireControl>,
}

impl Enemy {
    pub fn new(x: f32, y: f32, pattern: MovementPattern, skin: EnemySkin, now_ms: u64) -> Self {
        let fire = (skin == EnemySkin::Creeper).then(|| FireControl {
            interval_ms: CREEPER_FIRE_INTERVAL_MS,
            last_fire_ms: now_ms,
        });
        Enemy {
            x,
            y,
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
            speed: ENEMY_SPEED,
            pattern,
            skin,
            phase: 0.0,
            drift_dir: DRIFT_AMPLITUDE,
            leg_travel: 0.0,
            fire,
        }
    }

    /// The warden profile: bigger box, straight descent, always fires.
    pub fn warden(x: f32, y: f32, now_ms: u64) -> Self {
        Enemy {
            x,
            y,
            width: WARDEN_WIDTH,
            height: WARDEN_HEIGHT,
            speed: ENEMY_SPEED,
            pattern: MovementPattern::Straight,
            skin: EnemySkin::Warden,
            phase: 0.0,
            drift_dir: DRIFT_AMPLITUDE,
            leg_travel: 0.0,
            fire: Some(FireControl {
                interval_ms: WARDEN_FIRE_INTERVAL_MS,
                last_fire_ms: now_ms,
            }),
        }
    }

    /// Descend and drift per the movement pattern.
    pub fn advance(&mut self, dt: f32) {
        let drop = self.speed * dt;
        self.y += drop;
        match self.pattern {
            MovementPattern::Straight => {}
            MovementPattern::Sinusoidal => {
                self.x += self.phase.sin() * DRIFT_AMPLITUDE * dt;
                self.phase += SINE_PHASE_STEP * dt;
            }
            MovementPattern::Zigzag => {
                // Flips after every leg's worth of descent, tracked as
                // accumulated travel rather than an exact y check.
                self.x += self.drift_dir * dt;
                self.leg_travel += drop;
                if self.leg_travel >= ZIGZAG_LEG {
                    self.drift_dir = -self.drift_dir;
                    self.leg_travel -= ZIGZAG_LEG;
                }
            }
        }
    }

    /// Emit a downward shot when this enemy's fire interval has elapsed.
    /// Non-firing variants always return `None`.
    pub fn maybe_fire(&mut self, now_ms: u64) -> Option<EnemyBullet> {
        let shot = if self.skin == EnemySkin::Warden {
            EnemyShot::Sonic
        } else {
            EnemyShot::Tnt
        };
        let fire = self.fire.as_mut()?;
        if now_ms.saturating_sub(fire.last_fire_ms) < fire.interval_ms {
            return None;
        }
        fire.last_fire_ms = now_ms;
        Some(EnemyBullet {
            x: self.x + self.width / 2.0 - ENEMY_BULLET_SIZE / 2.0,
            y: self.y + self.height,
            shot,
        })
    }

    pub fn is_past_bottom(&self, canvas_height: f32) -> bool {
        self.y > canvas_height
    }

    pub fn aabb(&self) -> Aabb {
        Aabb { x: self.x, y: self.y, w: self.width, h: self.height }
    }
}

// ── Power-ups ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Elevated speed and fire rate for a fixed duration.
    Booster,
    /// Flat +100 score on pickup.
    ScoreMultiplier,
    /// Flat +250 score on pickup.
    ScoreMultiplier2,
    UpgradeBullet1,
    UpgradeBullet2,
    UpgradeBullet3,
    UpgradeBullet4,
    /// +1 life on pickup.
    Heart,
}

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
}

impl PowerUp {
    /// Power-ups always enter at the top of the canvas.
    pub fn new(kind: PowerUpKind, x: f32) -> Self {
        PowerUp { kind, x, y: 0.0 }
    }

    pub fn advance(&mut self, dt: f32) {
        self.y += POWER_UP_SPEED * dt;
    }

    pub fn is_past_bottom(&self, canvas_height: f32) -> bool {
        self.y > canvas_height
    }

    pub fn aabb(&self) -> Aabb {
        Aabb { x: self.x, y: self.y, w: POWER_UP_SIZE, h: POWER_UP_SIZE }
    }
}

// ── Session state ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    /// Player collided with an enemy.
    Crashed,
    /// Player collided with an enemy bullet.
    ShotDown,
    /// An enemy reached the bottom with the last life.
    OutOfLives,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Over(GameOverCause),
}

pub const ZONE_ALERT_FADE_STEP: f32 = 0.02;

/// Oscillating banner state shown while wardens can spawn.  Not a one-shot
/// animation: opacity bounces between 0 and 1 for as long as the score
/// stays inside the warden zone.
#[derive(Clone, Debug)]
pub struct ZoneAlert {
    pub opacity: f32,
    pub fading_in: bool,
}

impl ZoneAlert {
    pub fn new() -> Self {
        ZoneAlert { opacity: 0.0, fading_in: true }
    }

    pub fn step(&mut self, dt: f32) {
        let step = ZONE_ALERT_FADE_STEP * dt;
        if self.fading_in {
            self.opacity += step;
            if self.opacity >= 1.0 {
                self.opacity = 1.0;
                self.fading_in = false;
            }
        } else {
            self.opacity -= step;
            if self.opacity <= 0.0 {
                self.opacity = 0.0;
                self.fading_in = true;
            }
        }
    }
}

impl Default for ZoneAlert {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything one session owns.  Mutated only inside a frame step or a
/// spawner tick; the cooperative timeline guarantees the two never
/// interleave.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub enemy_bullets: Vec<EnemyBullet>,
    /// Monotonically non-decreasing across the session.
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
    pub booster_active: bool,
    pub booster_end_ms: u64,
    /// Consulted by kill scoring but never armed by any pickup; the score
    /// multipliers grant flat bonuses only.
    pub score_multiplier_active: bool,
    pub score_multiplier_end_ms: u64,
    /// One-shot flags for the four bullet-upgrade drops, in tier order.
    pub upgrade_spawned: [bool; 4],
    /// Wrapping vertical scroll offset of the background.
    pub background_y: f32,
    pub zone_alert: ZoneAlert,
    pub width: f32,
    pub height: f32,
}
