//! Core domain types for Tally.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application.

use thiserror::Error;

// ============================================================================
// Operators
// ============================================================================

/// A pending binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

/// Arithmetic failure raised by [`Operator::apply`].
///
/// The `Display` impl is the literal text shown to the user, so the error
/// value doubles as the transient display message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("Cannot divide by zero!")]
    DivisionByZero,
}

impl MathError {
    /// The literal text shown on the display while the error is active.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DivisionByZero => "Cannot divide by zero!",
        }
    }
}

impl Operator {
    /// The symbol rendered in the pending-operation line and on the keypad.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Modulo => "%",
        }
    }

    /// ASCII fallback for terminals without the multiplication/division signs.
    #[must_use]
    pub const fn ascii_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }

    /// Apply the operator to a pair of operands.
    ///
    /// Division by zero is the only rejected input; every other pair produces
    /// a plain `f64` result. Modulo is the IEEE-754 remainder of `f64::%`, so
    /// modulo by zero yields NaN rather than an error.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, MathError> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide => {
                if rhs == 0.0 {
                    Err(MathError::DivisionByZero)
                } else {
                    Ok(lhs / rhs)
                }
            }
            Self::Modulo => Ok(lhs % rhs),
        }
    }
}

// ============================================================================
// Keypad keys
// ============================================================================

/// A key on the calculator keypad.
///
/// This is both the input event fed to the engine and the identity of a
/// keypad button for rendering (the pressed-key flash references a `Key`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A digit key, `0`-`9`.
    Digit(u8),
    /// The decimal point.
    Point,
    /// One of the binary operator keys.
    Op(Operator),
    /// `=` / Enter.
    Equals,
    /// `AC` / Escape.
    Clear,
    /// `DEL` / Backspace.
    Delete,
}

impl Key {
    /// Keypad button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Digit(d) => digit_label(d),
            Self::Point => ".",
            Self::Op(op) => op.symbol(),
            Self::Equals => "=",
            Self::Clear => "AC",
            Self::Delete => "DEL",
        }
    }

    /// Keypad button label restricted to ASCII glyphs.
    #[must_use]
    pub const fn ascii_label(self) -> &'static str {
        match self {
            Self::Op(op) => op.ascii_symbol(),
            other => other.label(),
        }
    }
}

const fn digit_label(d: u8) -> &'static str {
    match d {
        0 => "0",
        1 => "1",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        _ => "9",
    }
}

// ============================================================================
// UI options
// ============================================================================

/// Presentation flags shared between the engine (state ownership) and the
/// tui (rendering). Populated from the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Use ASCII-only glyphs for the keypad and status bar.
    pub ascii_only: bool,
    /// Use a high-contrast color palette.
    pub high_contrast: bool,
    /// Disable the keypad press flash.
    pub reduced_motion: bool,
}
