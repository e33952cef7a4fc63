use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::Result;
use crate::terminal::Key;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(AppEvent::Key(key));
                }
            }
        }
        Ok(AppEvent::Tick)
    }
}

/// What a key press does to the form on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Send the page with an attention key.
    Submit(Key),
    NextField,
    PrevField,
    Input(char),
    Backspace,
    /// Abandon the session.
    Interrupt,
    None,
}

impl From<KeyEvent> for FormAction {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                FormAction::Interrupt
            }
            KeyCode::Enter => FormAction::Submit(Key::Enter),
            KeyCode::Esc => FormAction::Submit(Key::Clear),
            KeyCode::F(n) if (1..=12).contains(&n) => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    FormAction::Submit(Key::Pf(n + 12))
                } else {
                    FormAction::Submit(Key::Pf(n))
                }
            }
            KeyCode::Tab => FormAction::NextField,
            KeyCode::BackTab => FormAction::PrevField,
            KeyCode::Backspace => FormAction::Backspace,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                FormAction::Input(c)
            }
            _ => FormAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_attention_keys() {
        assert_eq!(FormAction::from(press(KeyCode::Enter)), FormAction::Submit(Key::Enter));
        assert_eq!(FormAction::from(press(KeyCode::Esc)), FormAction::Submit(Key::Clear));
        assert_eq!(FormAction::from(press(KeyCode::F(4))), FormAction::Submit(Key::Pf(4)));
        assert_eq!(
            FormAction::from(KeyEvent::new(KeyCode::F(3), KeyModifiers::SHIFT)),
            FormAction::Submit(Key::Pf(15))
        );
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(FormAction::from(press(KeyCode::Char('x'))), FormAction::Input('x'));
        assert_eq!(FormAction::from(press(KeyCode::Tab)), FormAction::NextField);
        assert_eq!(FormAction::from(press(KeyCode::BackTab)), FormAction::PrevField);
        assert_eq!(FormAction::from(press(KeyCode::Backspace)), FormAction::Backspace);
        assert_eq!(FormAction::from(press(KeyCode::Up)), FormAction::None);
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(FormAction::from(key), FormAction::Interrupt);
    }
}
