//! The navigation transition table.
//!
//! ```text
//! Headlines --refresh--> Headlines      Picker --select--> Headlines(resolved)
//! Headlines --change---> Picker(dflt)   Picker --switch--> Picker(other)
//! Headlines --quit-----> Exit           Picker --back----> Headlines
//!                                       Picker --quit----> Exit
//! ```
//!
//! Unbound keys leave the view and state unchanged.

use crate::config::KeybindingConfig;
use crate::domain::FeedCatalog;
use crate::screen::{CHOICE_FIELD, NEW_URL_FIELD};
use crate::session::state::{PickerKind, SessionState, View, ViewResult};
use crate::terminal::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlineAction {
    Refresh,
    ChangeChannel,
    Quit,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    Select,
    SwitchPicker,
    Back,
    Quit,
    None,
}

/// Computes the next view from the current one and the user's response.
pub struct StateMachine<'a> {
    catalog: &'a FeedCatalog,
    keys: &'a KeybindingConfig,
    default_picker: PickerKind,
}

impl<'a> StateMachine<'a> {
    pub fn new(
        catalog: &'a FeedCatalog,
        keys: &'a KeybindingConfig,
        default_picker: PickerKind,
    ) -> Self {
        Self {
            catalog,
            keys,
            default_picker,
        }
    }

    pub fn transition(&self, view: View, state: SessionState, response: &Response) -> ViewResult {
        match view {
            View::Headlines => self.on_headlines(state, response),
            View::Picker(kind) => self.on_picker(kind, state, response),
            View::Exit => ViewResult::new(View::Exit, state),
        }
    }

    fn on_headlines(&self, state: SessionState, response: &Response) -> ViewResult {
        let next = match self.keys.headline_action(response.key) {
            HeadlineAction::Refresh | HeadlineAction::None => View::Headlines,
            HeadlineAction::ChangeChannel => View::Picker(self.default_picker),
            HeadlineAction::Quit => View::Exit,
        };
        ViewResult::new(next, state)
    }

    fn on_picker(&self, kind: PickerKind, state: SessionState, response: &Response) -> ViewResult {
        match self.keys.picker_action(response.key) {
            PickerAction::Select => {
                ViewResult::new(View::Headlines, select(self.catalog, state, response))
            }
            PickerAction::SwitchPicker => ViewResult::new(View::Picker(kind.other()), state),
            PickerAction::Back => ViewResult::new(View::Headlines, state),
            PickerAction::Quit => ViewResult::new(View::Exit, state),
            PickerAction::None => ViewResult::new(View::Picker(kind), state),
        }
    }
}

/// Applies a picker submission to the session.
///
/// A typed URL wins over a numeric choice and is remembered for later
/// pickers. A numeric choice indexes the catalog plus any remembered URL;
/// a choice that is out of range or does not parse selects entry 0.
/// With neither, the current URL is kept.
pub fn select(catalog: &FeedCatalog, mut state: SessionState, response: &Response) -> SessionState {
    if let Some(url) = response.value(NEW_URL_FIELD) {
        state.current_url = url.to_string();
        state.pending_new_url = Some(url.to_string());
    } else if let Some(raw) = response.value(CHOICE_FIELD) {
        state.current_url = match parse_choice(raw) {
            Some(index) => state.resolve_choice(catalog, index).to_string(),
            None => catalog.default_url().to_string(),
        };
    }
    state
}

/// Reads up to two leading digits; `None` when there are none.
pub fn parse_choice(raw: &str) -> Option<usize> {
    let digits: String = raw
        .trim()
        .chars()
        .take(2)
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
