use chrono::{DateTime, Utc};

use crate::config::keybindings::label;
use crate::config::KeybindingConfig;
use crate::format::{pad_center, pad_right, wrap};
use crate::screen::{legend, rule, FOOTER_RULE_ROW};
use crate::terminal::{Color, Field, Page, SCREEN_COLS};

const FIRST_HEADLINE_ROW: u16 = 3;
const LAST_HEADLINE_ROW: u16 = 21;
const TITLE_COL: u16 = 8;
const TITLE_WIDTH: usize = 53;

/// Builds the headline view.
///
/// `lines` are the formatted headlines in feed order. Each is numbered from
/// 1 and wrapped to the screen width; wrapped lines that do not fit above
/// the footer are dropped.
pub fn headline_view(
    title: &str,
    lines: &[String],
    updated: DateTime<Utc>,
    keys: &KeybindingConfig,
) -> Page {
    let cols = usize::from(SCREEN_COLS);
    let mut fields = vec![
        Field::text(0, 0, pad_center("RSS Feed", cols))
            .color(Color::White)
            .intense(),
        Field::text(1, 0, "Channel").color(Color::Blue),
        Field::text(1, TITLE_COL, pad_right(title, TITLE_WIDTH)).color(Color::Turquoise),
        Field::text(1, 62, "Updated").color(Color::Blue),
        Field::text(1, 70, updated.format("%H:%M UTC").to_string()).color(Color::Turquoise),
        rule(2),
    ];

    let rows = FIRST_HEADLINE_ROW..=LAST_HEADLINE_ROW;
    let wrapped = lines
        .iter()
        .enumerate()
        .flat_map(|(i, line)| wrap(&format!("{:2}. {}", i + 1, line.trim()), cols));
    for (row, text) in rows.zip(wrapped) {
        fields.push(Field::text(row, 0, text).color(Color::White));
    }

    fields.push(rule(FOOTER_RULE_ROW));
    fields.extend(legend(&[
        (0, label(&keys.refresh), "Refresh"),
        (22, label(&keys.quit), "Exit"),
        (45, label(&keys.change_channel), "Change channel"),
    ]));

    let (accept_keys, exit_keys) = keys.headline_keys();
    Page {
        fields,
        accept_keys,
        exit_keys,
        ..Page::default()
    }
}
