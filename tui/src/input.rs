//! Input handling for the Tally TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use tally_engine::App;
use tally_types::{Key, Operator};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Non-blocking input source: a blocking task polls crossterm and feeds a
/// bounded channel that the frame loop drains.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so the input thread unblocks if it is
        // currently backpressured on a send.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
        debug!("Input pump stopped");
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    // Bounded queue: apply backpressure instead of dropping
                    // events so key-repeat bursts stay ordered.
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain the input queue (bounded per frame) and apply events to the app.
///
/// Returns `true` when the loop should exit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

fn apply_event(app: &mut App, event: Event) -> bool {
    if let Event::Key(key) = event {
        // Handle press + repeat events (ignore releases)
        if matches!(key.kind, KeyEventKind::Release) {
            return app.should_quit();
        }

        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if matches!(key.code, KeyCode::Char('q' | 'Q')) {
            debug!("Quit requested from keyboard");
            app.request_quit();
            return app.should_quit();
        }

        if let Some(key) = map_key(&key) {
            app.press(key);
        }
    }
    app.should_quit()
}

/// Keyboard-to-keypad mapping: digits and `.` append, `+ - * / %` choose an
/// operation, Enter/`=` evaluates, Esc clears, Backspace/Delete deletes.
fn map_key(key: &KeyEvent) -> Option<Key> {
    match key.code {
        KeyCode::Char(c @ '0'..='9') => Some(Key::Digit(c as u8 - b'0')),
        KeyCode::Char('.') => Some(Key::Point),
        KeyCode::Char('+') => Some(Key::Op(Operator::Add)),
        KeyCode::Char('-') => Some(Key::Op(Operator::Subtract)),
        KeyCode::Char('*' | 'x' | 'X') => Some(Key::Op(Operator::Multiply)),
        KeyCode::Char('/') => Some(Key::Op(Operator::Divide)),
        KeyCode::Char('%') => Some(Key::Op(Operator::Modulo)),
        KeyCode::Char('=') | KeyCode::Enter => Some(Key::Equals),
        KeyCode::Esc => Some(Key::Clear),
        KeyCode::Backspace | KeyCode::Delete => Some(Key::Delete),
        _ => None,
    }
}
