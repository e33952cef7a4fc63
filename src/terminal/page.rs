use std::collections::HashMap;

use crate::terminal::{Key, SCREEN_COLS, SCREEN_ROWS};

/// The base colors of an extended-attribute terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Blue,
    Red,
    Pink,
    Green,
    Turquoise,
    Yellow,
    White,
}

/// One positioned run of text on a page, optionally an input field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Field {
    pub row: u16,
    pub col: u16,
    pub content: String,
    /// Named fields can be filled from page values or returned in responses.
    pub name: Option<String>,
    pub writable: bool,
    /// Input restricted to digits.
    pub numeric: bool,
    /// Input length for writable fields; text fields use their content.
    pub length: Option<u16>,
    pub color: Color,
    pub intense: bool,
    pub underscore: bool,
}

impl Field {
    pub fn text(row: u16, col: u16, content: impl Into<String>) -> Self {
        Self {
            row,
            col,
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn input(row: u16, col: u16, name: &str, length: u16) -> Self {
        Self {
            row,
            col,
            name: Some(name.to_string()),
            writable: true,
            length: Some(length),
            ..Self::default()
        }
    }

    /// A protected field whose content is supplied by name, e.g. an error line.
    pub fn output(row: u16, col: u16, name: &str, length: u16) -> Self {
        Self {
            row,
            col,
            name: Some(name.to_string()),
            length: Some(length),
            ..Self::default()
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn intense(mut self) -> Self {
        self.intense = true;
        self
    }

    pub fn underscore(mut self) -> Self {
        self.underscore = true;
        self
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    /// Columns the field occupies on screen.
    pub fn width(&self) -> usize {
        self.length
            .map(usize::from)
            .unwrap_or_else(|| self.content.chars().count())
    }
}

/// A complete screen ready for a [`Terminal`](super::Terminal).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub fields: Vec<Field>,
    /// Initial values for named fields, returned unless the user edits them.
    pub values: HashMap<String, String>,
    /// Keys that submit the page with its input.
    pub accept_keys: Vec<Key>,
    /// Keys that leave the page without input being considered.
    pub exit_keys: Vec<Key>,
    /// Named field that receives messages from the terminal.
    pub error_field: Option<String>,
    pub cursor: (u16, u16),
}

impl Page {
    pub fn accepts(&self, key: Key) -> bool {
        self.accept_keys.contains(&key) || self.exit_keys.contains(&key)
    }

    pub fn is_exit_key(&self, key: Key) -> bool {
        self.exit_keys.contains(&key)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
    }

    pub fn input_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.writable)
    }

    /// Text currently shown in `field`: an override, a page value, or its content.
    pub fn display_text<'a>(&'a self, field: &'a Field, overrides: &'a HashMap<String, String>) -> &'a str {
        field
            .name
            .as_deref()
            .and_then(|name| overrides.get(name).or_else(|| self.values.get(name)))
            .map(String::as_str)
            .unwrap_or(&field.content)
    }

    /// Renders the page as `SCREEN_ROWS` lines of `SCREEN_COLS` characters.
    ///
    /// `overrides` replaces the text of named fields, e.g. with edited input
    /// or a message for the error field. Underscored input fields are filled
    /// with `_` to show their extent.
    pub fn text_grid(&self, overrides: &HashMap<String, String>) -> Vec<String> {
        let cols = usize::from(SCREEN_COLS);
        let mut grid = vec![vec![' '; cols]; usize::from(SCREEN_ROWS)];

        for field in &self.fields {
            let Some(line) = grid.get_mut(usize::from(field.row)) else {
                continue;
            };
            let text = self.display_text(field, overrides);
            let width = field.width().max(text.chars().count());
            let filler = if field.writable && field.underscore { '_' } else { ' ' };
            let start = usize::from(field.col);
            let padded = text.chars().chain(std::iter::repeat(filler)).take(width);

            for (offset, c) in padded.enumerate() {
                match line.get_mut(start + offset) {
                    Some(cell) => *cell = c,
                    None => break,
                }
            }
        }

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}
