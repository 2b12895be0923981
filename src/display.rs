//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! world.  No game logic is performed; this module only scales world
//! coordinates down to terminal cells and translates state into terminal
//! commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use void_raiders::entities::{
    Bullet, BulletTier, Enemy, EnemyBullet, EnemyShot, EnemySkin, GameOverCause, GameStatus,
    PowerUp, PowerUpKind, World,
};
use void_raiders::spawn::WARDEN_ZONE;

/// World pixels per terminal cell, horizontally and vertically.
pub const CELL_W: f32 = 16.0;
pub const CELL_H: f32 = 32.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_BOOST: Color = Color::Magenta;
const C_PLAYER: Color = Color::White;
const C_STAR: Color = Color::DarkGrey;
const C_WARDEN: Color = Color::Red;
const C_SHOT_TNT: Color = Color::Red;
const C_SHOT_SONIC: Color = Color::Blue;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, world)?;
    draw_hud(out, world)?;
    draw_zone_alert(out, world)?;

    for enemy in &world.enemies {
        draw_enemy(out, enemy)?;
    }
    for bullet in &world.bullets {
        draw_bullet(out, bullet)?;
    }
    for shot in &world.enemy_bullets {
        draw_enemy_bullet(out, shot)?;
    }
    for power_up in &world.power_ups {
        draw_power_up(out, power_up)?;
    }

    draw_player(out, world)?;

    if let GameStatus::Over(cause) = world.status {
        draw_game_over(out, world, cause)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

/// Map a world position to a terminal cell.
fn cell(x: f32, y: f32) -> (u16, u16) {
    ((x / CELL_W).max(0.0) as u16, (y / CELL_H).max(0.0) as u16)
}

// ── Background ────────────────────────────────────────────────────────────────

/// Sparse scrolling star field derived from the wrapping background
/// offset; purely decorative.
fn draw_background<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    let rows = (world.height / CELL_H) as i32;
    let cols = ((world.width / CELL_W) as i32).max(1);
    let offset = (world.background_y / CELL_H) as i32;

    out.queue(style::SetForegroundColor(C_STAR))?;
    for row in 1..rows {
        let src = (row - offset).rem_euclid(rows.max(1));
        if src % 3 == 0 {
            let col = (src * 37 + 11) % cols;
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print('·'))?;
        }
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    let cols = (world.width / CELL_W) as u16;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", world.score)))?;

    let lives = format!("Lives: {}", world.lives);
    out.queue(cursor::MoveTo(
        cols.saturating_sub(lives.chars().count() as u16 + 1),
        0,
    ))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives))?;

    if world.booster_active {
        out.queue(cursor::MoveTo((cols / 2).saturating_sub(3), 0))?;
        out.queue(style::SetForegroundColor(C_HUD_BOOST))?;
        out.queue(Print("BOOST!"))?;
    }
    Ok(())
}

/// Terminal cells have no alpha, so the oscillating opacity is quantized
/// to three visibility levels.
fn draw_zone_alert<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    if !WARDEN_ZONE.contains(&world.score) {
        return Ok(());
    }
    let color = match world.zone_alert.opacity {
        o if o >= 0.66 => Color::Cyan,
        o if o >= 0.33 => Color::DarkCyan,
        _ => return Ok(()),
    };
    let text = "!! Space Ancient Zone Alert !!";
    let cols = (world.width / CELL_W) as u16;
    out.queue(cursor::MoveTo(
        (cols / 2).saturating_sub(text.chars().count() as u16 / 2),
        1,
    ))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    let (col, row) = cell(world.player.x, world.player.y);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print("<=◭=>"))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy) -> std::io::Result<()> {
    let (col, row) = cell(enemy.x, enemy.y);
    let (sprite, color) = match enemy.skin {
        EnemySkin::Zombie => ("[Z]", Color::Green),
        EnemySkin::Skeleton => ("[S]", Color::Grey),
        EnemySkin::Creeper => ("[C]", Color::DarkGreen),
        EnemySkin::Evoker => ("[E]", Color::DarkMagenta),
        EnemySkin::Vex => ("[V]", Color::Cyan),
        EnemySkin::Warden => ("[[WARDEN]]", C_WARDEN),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Bullet) -> std::io::Result<()> {
    let (col, row) = cell(bullet.x, bullet.y);
    let color = match bullet.tier {
        BulletTier::Standard => Color::Cyan,
        BulletTier::Charge1 => Color::Yellow,
        BulletTier::Charge2 => Color::Green,
        BulletTier::Charge3 => Color::Magenta,
        BulletTier::Charge4 => Color::Red,
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print('↑'))?;
    Ok(())
}

fn draw_enemy_bullet<W: Write>(out: &mut W, shot: &EnemyBullet) -> std::io::Result<()> {
    let (col, row) = cell(shot.x, shot.y);
    let color = match shot.shot {
        EnemyShot::Tnt => C_SHOT_TNT,
        EnemyShot::Sonic => C_SHOT_SONIC,
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print('▼'))?;
    Ok(())
}

fn draw_power_up<W: Write>(out: &mut W, power_up: &PowerUp) -> std::io::Result<()> {
    let (col, row) = cell(power_up.x, power_up.y);
    let (glyph, color) = match power_up.kind {
        PowerUpKind::Booster => ('B', Color::Magenta),
        PowerUpKind::ScoreMultiplier => ('$', Color::Yellow),
        PowerUpKind::ScoreMultiplier2 => ('§', Color::Yellow),
        PowerUpKind::UpgradeBullet1
        | PowerUpKind::UpgradeBullet2
        | PowerUpKind::UpgradeBullet3
        | PowerUpKind::UpgradeBullet4 => ('↟', Color::Cyan),
        PowerUpKind::Heart => ('♥', Color::Red),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Game over ─────────────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    world: &World,
    cause: GameOverCause,
) -> std::io::Result<()> {
    let message = match cause {
        GameOverCause::Crashed => "Crashed!!",
        GameOverCause::ShotDown => "Kaboom!!",
        GameOverCause::OutOfLives => "Out of Lives!!",
    };
    let cols = (world.width / CELL_W) as u16;
    let rows = (world.height / CELL_H) as u16;
    let cx = cols / 2;
    let cy = rows / 2;

    out.queue(cursor::MoveTo(
        cx.saturating_sub(message.chars().count() as u16 / 2),
        cy.saturating_sub(1),
    ))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(Print(message))?;

    let score = format!("Score= {}", world.score);
    out.queue(cursor::MoveTo(
        cx.saturating_sub(score.chars().count() as u16 / 2),
        cy,
    ))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score))?;

    let hint = "R : restart   Q : quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(hint.chars().count() as u16 / 2),
        cy + 2,
    ))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
