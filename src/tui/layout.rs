use std::collections::HashMap;

use ratatui::{
    layout::{Position, Rect},
    style::{Color as TuiColor, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

use crate::terminal::{Color, Field, Page, SCREEN_COLS, SCREEN_ROWS};
use crate::tui::form::FormState;

pub fn render(frame: &mut Frame, page: &Page, form: &FormState) {
    let screen = frame
        .area()
        .intersection(Rect::new(0, 0, SCREEN_COLS, SCREEN_ROWS));

    let mut overrides = form.texts();
    let message_row = match (&form.message, &page.error_field) {
        (Some(message), Some(name)) => {
            overrides.insert(name.clone(), message.clone());
            None
        }
        (Some(message), None) => Some(message.as_str()),
        (None, _) => None,
    };

    for field in &page.fields {
        render_field(frame, page, field, &overrides, screen);
    }

    // Pages without a message field show it over the legend
    if let Some(message) = message_row {
        let area = Rect::new(0, SCREEN_ROWS - 1, SCREEN_COLS, 1).intersection(screen);
        let style = Style::default().fg(TuiColor::Red).add_modifier(Modifier::BOLD);
        frame.render_widget(Paragraph::new(message.to_string()).style(style), area);
    }

    let (row, col) = form.cursor(page);
    if screen.contains(Position::new(col, row)) {
        frame.set_cursor_position(Position::new(col, row));
    }
}

fn render_field(
    frame: &mut Frame,
    page: &Page,
    field: &Field,
    overrides: &HashMap<String, String>,
    screen: Rect,
) {
    let text = page.display_text(field, overrides);
    let width = field.width().max(text.chars().count());
    if width == 0 {
        return;
    }

    let area = Rect::new(field.col, field.row, width as u16, 1).intersection(screen);
    if area.is_empty() {
        return;
    }

    let padded: String = text.chars().chain(std::iter::repeat(' ')).take(width).collect();
    frame.render_widget(Paragraph::new(padded).style(field_style(field)), area);
}

fn field_style(field: &Field) -> Style {
    let mut style = Style::default().fg(tui_color(field.color));
    if field.intense {
        style = style.add_modifier(Modifier::BOLD);
    }
    if field.underscore {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

fn tui_color(color: Color) -> TuiColor {
    match color {
        Color::Default => TuiColor::Reset,
        Color::Blue => TuiColor::Blue,
        Color::Red => TuiColor::Red,
        Color::Pink => TuiColor::Magenta,
        Color::Green => TuiColor::Green,
        Color::Turquoise => TuiColor::Cyan,
        Color::Yellow => TuiColor::Yellow,
        Color::White => TuiColor::White,
    }
}
