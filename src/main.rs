mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use void_raiders::compute::{self, frame, init_world, player_fire};
use void_raiders::entities::{GameStatus, World};
use void_raiders::spawn::Spawner;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Milliseconds in one 60 Hz reference frame; actual elapsed time is
/// divided by this to produce the `dt` passed to the core.
const REF_FRAME_MS: f32 = 1000.0 / 60.0;

/// Cap on `dt` so a stalled terminal doesn't teleport everything.
const MAX_DT: f32 = 3.0;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈64 ms) is
/// refreshed before expiry while the key is down.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame_no: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame_no.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Session loop ──────────────────────────────────────────────────────────────

/// Run one full session to termination.
///
/// Returns `true` → quit program, `false` → restart with a fresh world.
/// Restart never revives a finished world: the caller builds a new one
/// (and a new spawner and clock) from scratch.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key; each frame the live keys are read
/// back out.  Steering is level-triggered — the held direction is
/// re-asserted every frame and cleared when no direction is live — while
/// fire requests are rate-limited inside the core by the player cooldown.
fn session<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<bool> {
    let (cols, rows) = terminal::size()?;
    let mut world: World = init_world(
        cols as f32 * display::CELL_W,
        rows as f32 * display::CELL_H,
    );
    let mut spawner = Spawner::new(0);
    let mut rng = thread_rng();

    let origin = Instant::now();
    let mut last_step = Instant::now();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame_no: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame_no += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame_no);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if world.status != GameStatus::Running =>
                        {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame_no);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let now_ms = origin.elapsed().as_millis() as u64;

        if world.status == GameStatus::Running {
            let left = is_held(&key_frame, &KeyCode::Left, frame_no)
                || is_held(&key_frame, &KeyCode::Char('a'), frame_no)
                || is_held(&key_frame, &KeyCode::Char('A'), frame_no);
            let right = is_held(&key_frame, &KeyCode::Right, frame_no)
                || is_held(&key_frame, &KeyCode::Char('d'), frame_no)
                || is_held(&key_frame, &KeyCode::Char('D'), frame_no);

            if left && !right {
                compute::steer_left(&mut world);
            } else if right && !left {
                compute::steer_right(&mut world);
            } else {
                compute::steer_stop(&mut world);
            }

            if is_held(&key_frame, &KeyCode::Char(' '), frame_no) {
                player_fire(&mut world, now_ms);
            }

            let dt = (last_step.elapsed().as_secs_f32() * 1000.0 / REF_FRAME_MS).min(MAX_DT);
            last_step = Instant::now();

            spawner.run(&mut world, now_ms, &mut rng);
            frame(&mut world, now_ms, dt);
        }

        display::render(out, &world)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        if session(out, rx)? {
            break;
        }
        // Otherwise loop around with an entirely fresh session
    }
    Ok(())
}
