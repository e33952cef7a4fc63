//! Page builders for the three session views.
//!
//! Builders are pure: they take already formatted text and the keybindings
//! and return a [`Page`] laid out on the 80x24 grid.

mod headlines;
mod picker;

pub use headlines::headline_view;
pub use picker::{channel_picker_view, feed_picker_view};

use crate::terminal::{Color, Field, SCREEN_COLS};

/// Free-text URL input on the picker views.
pub const NEW_URL_FIELD: &str = "newURL";
/// Numeric entry selection on the picker views.
pub const CHOICE_FIELD: &str = "choice";
/// Message line on the picker views.
pub const ERROR_FIELD: &str = "errormsg";

/// Last row, holding the key legend.
const LEGEND_ROW: u16 = 23;
/// Rule above the legend.
const FOOTER_RULE_ROW: u16 = 22;

fn rule(row: u16) -> Field {
    Field::text(row, 0, "-".repeat(usize::from(SCREEN_COLS))).color(Color::Blue)
}

/// Legend entries: the key label at `col`, its description one column after.
fn legend(entries: &[(u16, String, &str)]) -> Vec<Field> {
    let mut fields = Vec::with_capacity(entries.len() * 2);
    for (col, key, text) in entries {
        let text_col = col + key.chars().count() as u16 + 1;
        fields.push(Field::text(LEGEND_ROW, *col, key.clone()).color(Color::White));
        fields.push(Field::text(LEGEND_ROW, text_col, *text).color(Color::Blue));
    }
    fields
}
