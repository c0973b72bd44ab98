use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use circle_blaster::compute::{apply_thrust, init_state, shoot, tick};
use circle_blaster::display::Screen;
use circle_blaster::entities::{GameState, GameStatus};
use circle_blaster::geometry::Vec2;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈66 ms) stays
/// refreshed while the key is actively repeating.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn held_direction(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Vec2 {
    let pressed = |keys: &[KeyCode]| keys.iter().any(|k| is_held(key_frame, k, frame));

    let mut dir = Vec2::ZERO;
    if pressed(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]) {
        dir.y -= 1.0;
    }
    if pressed(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]) {
        dir.y += 1.0;
    }
    if pressed(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]) {
        dir.x -= 1.0;
    }
    if pressed(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]) {
        dir.x += 1.0;
    }
    dir
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → restart with a fresh state.
///
/// Input model: instead of acting on each key event individually, we keep a
/// `key_frame` map recording the frame number of the last press/repeat event
/// for every key.  Each frame we check which keys are still "fresh" (within
/// `HOLD_WINDOW` frames) and apply their thrust together, so diagonal
/// movement and firing never interfere.
fn game_loop<W: Write>(
    out: &mut W,
    screen: &mut Screen,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(true);
                            }
                            KeyCode::Char('c')
                                if modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                return Ok(true);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if state.status == GameStatus::GameOver =>
                            {
                                return Ok(false);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if state.status == GameStatus::Playing {
                        if let Some(target) = screen.cell_to_canvas(column, row) {
                            *state = shoot(state, target);
                        }
                    }
                }
                _ => {}
            }
        }

        if state.status == GameStatus::Playing {
            let dir = held_direction(&key_frame, frame);
            if dir != Vec2::ZERO {
                *state = apply_thrust(state, dir);
            }
            *state = tick(state, &mut rng);
        }

        screen.render(out, state)?;

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
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back
    // gracefully to the hold-window expiry.
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
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        let (cols, rows) = terminal::size()?;
        let mut screen = Screen::new(cols, rows);
        let (width, height) = screen.canvas_size();

        let mut state = init_state(width, height);
        let quit = game_loop(out, &mut screen, &mut state, rx)?;
        if quit {
            break;
        }
        // Otherwise start a fresh game
    }
    Ok(())
}
