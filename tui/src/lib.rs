//! TUI rendering for Tally using ratatui.

mod input;
mod theme;

pub use input::{InputPump, handle_events};
pub use theme::{Palette, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use tally_engine::App;
use tally_types::{Key, Operator, UiOptions};

/// Keypad layout, mirroring the original button grid. The first key of the
/// bottom row (`0`) is rendered double-width.
const KEYPAD_ROWS: [&[Key]; 5] = [
    &[
        Key::Clear,
        Key::Delete,
        Key::Op(Operator::Modulo),
        Key::Op(Operator::Divide),
    ],
    &[
        Key::Digit(7),
        Key::Digit(8),
        Key::Digit(9),
        Key::Op(Operator::Multiply),
    ],
    &[
        Key::Digit(4),
        Key::Digit(5),
        Key::Digit(6),
        Key::Op(Operator::Subtract),
    ],
    &[
        Key::Digit(1),
        Key::Digit(2),
        Key::Digit(3),
        Key::Op(Operator::Add),
    ],
    &[Key::Digit(0), Key::Point, Key::Equals],
];

const KEY_ROW_HEIGHT: u16 = 3;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);

    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4), // Display
            Constraint::Min(KEY_ROW_HEIGHT * KEYPAD_ROWS.len() as u16),
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_display(frame, app, chunks[0], &palette);
    draw_keypad(frame, app, chunks[1], &palette, options);
    draw_status_bar(frame, chunks[2], &palette);
}

/// The two-line display: pending operation above the operand being entered,
/// both right-aligned and rendered verbatim from the engine.
fn draw_display(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::horizontal(1));
    let inner_width = block.inner(area).width as usize;

    let current_style = if app.is_error() {
        styles::error_message(palette)
    } else {
        styles::current_operand(palette)
    };

    let previous = app.previous_operand();
    let lines = vec![
        Line::from(Span::styled(
            fit_right(&previous, inner_width).to_string(),
            styles::previous_operand(palette),
        )),
        Line::from(Span::styled(
            fit_right(app.current_operand(), inner_width).to_string(),
            current_style,
        )),
    ];

    let display = Paragraph::new(lines)
        .alignment(Alignment::Right)
        .block(block);
    frame.render_widget(display, area);
}

fn draw_keypad(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, options: UiOptions) {
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(KEY_ROW_HEIGHT); KEYPAD_ROWS.len()])
        .split(area);

    for (row, keys) in KEYPAD_ROWS.iter().enumerate() {
        // The bottom row gives its first key (0) the width of two cells.
        let constraints: Vec<Constraint> = if keys.len() == 4 {
            vec![Constraint::Ratio(1, 4); 4]
        } else {
            vec![
                Constraint::Ratio(2, 4),
                Constraint::Ratio(1, 4),
                Constraint::Ratio(1, 4),
            ]
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(row_areas[row]);

        for (cell, key) in cells.iter().zip(keys.iter()) {
            draw_key(frame, app, *cell, *key, palette, options);
        }
    }
}

fn draw_key(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    key: Key,
    palette: &Palette,
    options: UiOptions,
) {
    let label = if options.ascii_only {
        key.ascii_label()
    } else {
        key.label()
    };

    let fg = match key {
        Key::Op(_) => palette.accent,
        Key::Clear | Key::Delete => palette.warning,
        Key::Equals => palette.success,
        Key::Digit(_) | Key::Point => palette.text_primary,
    };

    let pressed = app.flashed_key() == Some(key);
    let bg = if pressed {
        palette.bg_key_pressed
    } else {
        palette.bg_key
    };
    let mut style = Style::default().fg(fg).bg(bg);
    if pressed {
        style = style.add_modifier(Modifier::BOLD);
    }

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(if pressed {
                    palette.text_primary
                } else {
                    palette.bg_key_pressed
                })),
        );
    frame.render_widget(button, area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, palette: &Palette) {
    let hints = [
        ("q", "quit"),
        ("esc", "clear"),
        ("bksp", "delete"),
        ("enter", "evaluate"),
    ];

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {key} "), styles::key_highlight(palette)));
        spans.push(Span::styled(action, styles::key_hint(palette)));
        spans.push(Span::raw("  "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Keep the rightmost portion of `text` that fits in `max_width` columns.
///
/// Operands grow without bound, so the display shows the tail (the digits
/// being edited) when the field overflows.
fn fit_right(text: &str, max_width: usize) -> &str {
    if text.width() <= max_width {
        return text;
    }
    let mut width = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = idx;
    }
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_right_keeps_short_text() {
        assert_eq!(fit_right("123", 10), "123");
        assert_eq!(fit_right("", 10), "");
    }

    #[test]
    fn fit_right_trims_from_the_left() {
        assert_eq!(fit_right("123456789", 4), "6789");
        assert_eq!(fit_right("3.14159", 3), "159");
    }

    #[test]
    fn fit_right_handles_wide_symbols() {
        // "8 ÷" is three columns; trimming to 2 drops the leading digit.
        assert_eq!(fit_right("8 ÷", 2), " ÷");
    }

    #[test]
    fn keypad_covers_every_key_once() {
        let mut keys: Vec<Key> = KEYPAD_ROWS.iter().flat_map(|row| row.iter().copied()).collect();
        assert_eq!(keys.len(), 19);
        keys.sort_by_key(|k| format!("{k:?}"));
        keys.dedup();
        assert_eq!(keys.len(), 19, "no key appears twice");
    }
}
