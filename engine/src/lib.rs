//! Core engine for Tally - calculator state machine and app state.
//!
//! This crate contains the `App` state machine without TUI dependencies.

use std::time::{Duration, Instant};

use tracing::debug;

// Re-export domain types for downstream crates.
pub use tally_types::{Key, MathError, Operator, UiOptions};

mod calculator;
pub use calculator::{Calculator, ERROR_REVERT_DELAY};

mod config;
pub use config::{AppConfig, ConfigError, TallyConfig, config_path};

/// How long a keypad button stays highlighted after activation.
pub const KEY_FLASH_DURATION: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy)]
struct KeyFlash {
    key: Key,
    until: Instant,
}

/// Application state: the calculator plus the UI concerns around it.
///
/// All mutation is synchronous, driven by the frame loop: input events call
/// [`App::press`], and [`App::tick`] advances the time-based transitions
/// (key flash expiry, error auto-revert). There is no shared mutable state
/// and no locking.
#[derive(Debug)]
pub struct App {
    calc: Calculator,
    options: UiOptions,
    flash: Option<KeyFlash>,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(options: UiOptions) -> Self {
        Self {
            calc: Calculator::new(),
            options,
            flash: None,
            should_quit: false,
        }
    }

    /// Route a keypad activation to the engine and record the press flash.
    pub fn press(&mut self, key: Key) {
        let now = Instant::now();
        debug!(?key, "keypad input");
        if !self.options.reduced_motion {
            self.flash = Some(KeyFlash {
                key,
                until: now + KEY_FLASH_DURATION,
            });
        }
        self.calc.press(key, now);
    }

    /// Advance time-based UI state. Called once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if self.flash.is_some_and(|flash| now >= flash.until) {
            self.flash = None;
        }
        self.calc.tick(now);
    }

    /// The keypad key currently flashed as pressed, if any.
    #[must_use]
    pub fn flashed_key(&self) -> Option<Key> {
        self.flash.map(|flash| flash.key)
    }

    #[must_use]
    pub fn current_operand(&self) -> &str {
        self.calc.current_operand()
    }

    #[must_use]
    pub fn previous_operand(&self) -> String {
        self.calc.previous_operand()
    }

    /// Whether the display is showing the division-by-zero message.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.calc.is_error()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.options
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
