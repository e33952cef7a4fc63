use std::collections::HashMap;

use crate::terminal::Page;

#[derive(Debug, Clone)]
struct InputField {
    name: String,
    row: u16,
    col: u16,
    width: usize,
    numeric: bool,
    text: String,
    edited: bool,
}

/// Editing state of a page's input fields while it is on screen.
#[derive(Debug, Clone)]
pub struct FormState {
    fields: Vec<InputField>,
    focus: usize,
    pub message: Option<String>,
}

impl FormState {
    /// Starts with each field showing its initial text and focus on the
    /// field under the page cursor.
    pub fn new(page: &Page) -> Self {
        let no_overrides = HashMap::new();
        let fields: Vec<InputField> = page
            .input_fields()
            .filter_map(|field| {
                Some(InputField {
                    name: field.name.clone()?,
                    row: field.row,
                    col: field.col,
                    width: field.width(),
                    numeric: field.numeric,
                    text: page.display_text(field, &no_overrides).to_string(),
                    edited: false,
                })
            })
            .collect();

        let focus = fields
            .iter()
            .position(|f| (f.row, f.col) == page.cursor)
            .unwrap_or(0);

        Self {
            fields,
            focus,
            message: None,
        }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Types a character into the focused field. The first keystroke
    /// replaces the initial text.
    pub fn insert(&mut self, c: char) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        if c.is_control() || (field.numeric && !c.is_ascii_digit()) {
            return;
        }
        if !field.edited {
            field.text.clear();
            field.edited = true;
        }
        if field.text.chars().count() < field.width {
            field.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.edited = true;
            field.text.pop();
        }
    }

    /// Current text of every input field, for drawing.
    pub fn texts(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.text.clone()))
            .collect()
    }

    /// Text of the fields the user changed.
    pub fn edited_values(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .filter(|f| f.edited)
            .map(|f| (f.name.clone(), f.text.clone()))
            .collect()
    }

    /// Screen position just after the focused field's text.
    pub fn cursor(&self, page: &Page) -> (u16, u16) {
        match self.fields.get(self.focus) {
            Some(field) => {
                let offset = field.text.chars().count().min(field.width.saturating_sub(1));
                (field.row, field.col + offset as u16)
            }
            None => page.cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{Field, Key};

    fn page() -> Page {
        let mut page = Page {
            fields: vec![
                Field::text(0, 0, "Header"),
                Field::input(2, 11, "newURL", 10),
                Field::input(3, 42, "choice", 2).numeric(),
            ],
            accept_keys: vec![Key::Enter],
            cursor: (3, 42),
            ..Page::default()
        };
        page.values.insert("choice".into(), "0".into());
        page
    }

    #[test]
    fn test_focus_starts_at_page_cursor() {
        let form = FormState::new(&page());
        assert_eq!(form.cursor(&page()), (3, 43));
        assert_eq!(form.texts().get("choice").map(String::as_str), Some("0"));
        assert!(form.edited_values().is_empty());
    }

    #[test]
    fn test_first_keystroke_replaces_initial_text() {
        let mut form = FormState::new(&page());
        form.insert('1');
        form.insert('2');
        form.insert('3');

        assert_eq!(form.edited_values().get("choice").map(String::as_str), Some("12"));
    }

    #[test]
    fn test_numeric_field_rejects_letters() {
        let mut form = FormState::new(&page());
        form.insert('x');
        assert!(form.edited_values().is_empty());
    }

    #[test]
    fn test_tab_moves_between_fields() {
        let page = page();
        let mut form = FormState::new(&page);

        form.next_field();
        assert_eq!(form.cursor(&page), (2, 11));
        for c in "abc".chars() {
            form.insert(c);
        }
        form.backspace();
        form.prev_field();
        assert_eq!(form.cursor(&page), (3, 43));

        let values = form.edited_values();
        assert_eq!(values.get("newURL").map(String::as_str), Some("ab"));
        assert!(!values.contains_key("choice"));
    }

    #[test]
    fn test_page_without_inputs() {
        let page = Page {
            fields: vec![Field::text(0, 0, "Only text")],
            cursor: (0, 0),
            ..Page::default()
        };
        let mut form = FormState::new(&page);
        form.insert('a');
        form.next_field();
        assert_eq!(form.cursor(&page), (0, 0));
        assert!(form.texts().is_empty());
    }
}
