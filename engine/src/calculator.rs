//! Calculator input/operation state machine.

use std::time::{Duration, Instant};

use tracing::debug;

use tally_types::{Key, MathError, Operator};

/// How long the division-by-zero message stays on the display before the
/// machine resets itself to the cleared state.
pub const ERROR_REVERT_DELAY: Duration = Duration::from_millis(2000);

const DEFAULT_OPERAND: &str = "0";

/// Phase of the calculator state machine.
///
/// # State Machine
/// ```text
/// ┌───────┐ choose operator   ┌───────────────────────┐
/// │ Ready │ ────────────────> │ Pending{previous, op} │
/// └───────┘ <──────────────── └───────────────────────┘
///     ^         evaluate             │
///     │                              │ evaluate ÷ 0
///     │  deadline passes             v
///     │                      ┌──────────────────┐
///     └───────────────────── │ Error{deadline}  │
///                            └──────────────────┘
/// ```
///
/// `Ready` has no pending operation, so the "previous operand" line is empty
/// exactly when no operator is set - the invariant holds by construction
/// instead of across two nullable fields. `Error` retains the pending
/// operands so the display keeps showing them under the error message until
/// the revert, as the original calculator did.
#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Ready,
    Pending {
        previous: String,
        op: Operator,
    },
    Error {
        previous: String,
        op: Operator,
        err: MathError,
        deadline: Instant,
    },
}

/// Finite-state accumulator turning keypad input into a pair of display
/// strings.
///
/// `current` is the operand being entered: always non-empty (normalized to
/// `"0"`), at most one decimal point. Created once at startup and mutated in
/// place for the session; there is no terminal state.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    current: String,
    phase: Phase,
}

impl Calculator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: DEFAULT_OPERAND.to_string(),
            phase: Phase::Ready,
        }
    }

    /// Route a key activation to the matching operation.
    ///
    /// While the error state is active only `AC` is honored; everything else
    /// is dropped until the deadline reverts the machine.
    pub fn press(&mut self, key: Key, now: Instant) {
        if matches!(self.phase, Phase::Error { .. }) {
            if key == Key::Clear {
                self.clear();
            }
            return;
        }

        match key {
            Key::Digit(d) => self.append(char::from(b'0' + d.min(9))),
            Key::Point => self.append('.'),
            Key::Op(op) => self.choose_operation(op, now),
            Key::Equals => self.evaluate(now),
            Key::Clear => self.clear(),
            Key::Delete => self.backspace(),
        }
    }

    /// Advance time-based transitions: revert an expired error state.
    pub fn tick(&mut self, now: Instant) {
        if let Phase::Error { deadline, .. } = self.phase
            && now >= deadline
        {
            debug!("error display expired, reverting to cleared state");
            self.clear();
        }
    }

    /// Append a digit or the decimal point to the current operand.
    ///
    /// A second decimal point is rejected. A lone `"0"` is replaced by the
    /// first non-point digit so operands never grow leading zeros. There is
    /// no length limit; unbounded growth is accepted behavior.
    fn append(&mut self, ch: char) {
        if ch == '.' && self.current.contains('.') {
            return;
        }
        if self.current == DEFAULT_OPERAND && ch != '.' {
            self.current.clear();
        }
        self.current.push(ch);
    }

    /// Select a binary operator, evaluating any pending operation first
    /// (chained calculation: left-to-right, no precedence).
    fn choose_operation(&mut self, op: Operator, now: Instant) {
        if matches!(self.phase, Phase::Pending { .. }) {
            self.evaluate(now);
            // Chained evaluation can fail (÷ 0). The error state owns the
            // display until it reverts; the new operator is dropped.
            if matches!(self.phase, Phase::Error { .. }) {
                return;
            }
        }

        self.phase = Phase::Pending {
            previous: std::mem::replace(&mut self.current, DEFAULT_OPERAND.to_string()),
            op,
        };
    }

    /// Apply the pending operator to the stored and current operands.
    ///
    /// No-op when nothing is pending, and when either operand fails to parse
    /// (unreachable with machine-built operands, but the quiet exit is kept
    /// rather than panicking). Division by zero enters the error state with
    /// the operands intact; success stores the rounded result as the new
    /// current operand and clears the pending operation.
    fn evaluate(&mut self, now: Instant) {
        let Phase::Pending { previous, op } = &self.phase else {
            return;
        };
        let op = *op;

        let Ok(lhs) = previous.parse::<f64>() else {
            return;
        };
        let Ok(rhs) = self.current.parse::<f64>() else {
            return;
        };

        match op.apply(lhs, rhs) {
            Ok(result) => {
                self.current = format_operand(round_result(result));
                self.phase = Phase::Ready;
            }
            Err(err) => {
                debug!(%err, lhs, rhs, "evaluation rejected");
                let Phase::Pending { previous, op } = std::mem::replace(&mut self.phase, Phase::Ready)
                else {
                    return;
                };
                self.phase = Phase::Error {
                    previous,
                    op,
                    err,
                    deadline: now + ERROR_REVERT_DELAY,
                };
            }
        }
    }

    /// Reset to the initial state. Idempotent.
    pub fn clear(&mut self) {
        self.current.clear();
        self.current.push_str(DEFAULT_OPERAND);
        self.phase = Phase::Ready;
    }

    /// Remove the last character of the current operand, normalizing an
    /// empty or bare-minus remainder back to `"0"`.
    fn backspace(&mut self) {
        if self.current == DEFAULT_OPERAND {
            return;
        }
        self.current.pop();
        if self.current.is_empty() || self.current == "-" {
            self.current.clear();
            self.current.push_str(DEFAULT_OPERAND);
        }
    }

    /// The number being entered, or the error message while the error state
    /// is active. Rendered verbatim by the display.
    #[must_use]
    pub fn current_operand(&self) -> &str {
        match &self.phase {
            Phase::Error { err, .. } => err.message(),
            _ => &self.current,
        }
    }

    /// The stored left-hand operand plus the pending operator symbol
    /// (e.g. `"5 +"`), or the empty string when nothing is pending.
    #[must_use]
    pub fn previous_operand(&self) -> String {
        match &self.phase {
            Phase::Ready => String::new(),
            Phase::Pending { previous, op } | Phase::Error { previous, op, .. } => {
                format!("{previous} {}", op.symbol())
            }
        }
    }

    /// Whether the transient division-by-zero state is active.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.phase, Phase::Error { .. })
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to 8 decimal places via scale-round-unscale to suppress binary
/// floating-point artifacts (`0.1 + 0.2` displays as `0.3`).
fn round_result(value: f64) -> f64 {
    (value * 1e8).round() / 1e8
}

/// Shortest decimal form of the result (`8`, not `8.0`).
fn format_operand(value: f64) -> String {
    format!("{value}")
}
