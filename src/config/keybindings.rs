//! Keybinding configuration for the session views.

use serde::Deserialize;

use crate::session::{HeadlineAction, PickerAction};
use crate::terminal::Key;

/// Attention keys bound to each view action.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    // Headline view
    pub refresh: Vec<String>,
    pub change_channel: Vec<String>,
    pub quit: Vec<String>,

    // Picker views
    pub select: Vec<String>,
    pub switch_picker: Vec<String>,
    pub back: Vec<String>,
    pub picker_quit: Vec<String>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            refresh: vec!["Enter".to_string()],
            change_channel: vec!["PF4".to_string()],
            quit: vec!["PF3".to_string()],
            select: vec!["Enter".to_string()],
            switch_picker: vec!["PF2".to_string()],
            back: vec!["PF3".to_string()],
            picker_quit: vec!["PF9".to_string()],
        }
    }
}

impl KeybindingConfig {
    /// Get the headline view action for a key.
    pub fn headline_action(&self, key: Key) -> HeadlineAction {
        if matches_key(key, &self.refresh) {
            HeadlineAction::Refresh
        } else if matches_key(key, &self.change_channel) {
            HeadlineAction::ChangeChannel
        } else if matches_key(key, &self.quit) {
            HeadlineAction::Quit
        } else {
            HeadlineAction::None
        }
    }

    /// Get the picker view action for a key.
    pub fn picker_action(&self, key: Key) -> PickerAction {
        if matches_key(key, &self.select) {
            PickerAction::Select
        } else if matches_key(key, &self.switch_picker) {
            PickerAction::SwitchPicker
        } else if matches_key(key, &self.back) {
            PickerAction::Back
        } else if matches_key(key, &self.picker_quit) {
            PickerAction::Quit
        } else {
            PickerAction::None
        }
    }

    /// Validating and non-validating keys of the headline view.
    pub fn headline_keys(&self) -> (Vec<Key>, Vec<Key>) {
        (
            parse_all(&[&self.refresh, &self.change_channel]),
            parse_all(&[&self.quit]),
        )
    }

    /// Validating and non-validating keys of the picker views.
    pub fn picker_keys(&self) -> (Vec<Key>, Vec<Key>) {
        (
            parse_all(&[&self.select, &self.switch_picker, &self.back]),
            parse_all(&[&self.picker_quit]),
        )
    }

    /// Checks that every binding names a known key.
    pub fn validate(&self) -> Result<(), String> {
        for binding in [
            &self.refresh,
            &self.change_channel,
            &self.quit,
            &self.select,
            &self.switch_picker,
            &self.back,
            &self.picker_quit,
        ]
        .into_iter()
        .flatten()
        {
            parse_key_string(binding)?;
        }
        Ok(())
    }
}

/// Label of the first binding, as shown in footer legends.
pub fn label(bindings: &[String]) -> String {
    bindings
        .iter()
        .find_map(|b| parse_key_string(b).ok())
        .map(|key| key.to_string())
        .unwrap_or_default()
}

fn matches_key(key: Key, bindings: &[String]) -> bool {
    bindings
        .iter()
        .any(|binding| parse_key_string(binding).is_ok_and(|parsed| parsed == key))
}

fn parse_all(groups: &[&Vec<String>]) -> Vec<Key> {
    let mut keys = Vec::new();
    for key in groups
        .iter()
        .flat_map(|group| group.iter())
        .filter_map(|binding| parse_key_string(binding).ok())
    {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Parse a key string into a [`Key`].
///
/// Supported formats: "Enter", "Clear", "PF1"-"PF24" (or "F1"-"F24"),
/// "PA1"-"PA3", case-insensitive.
pub fn parse_key_string(s: &str) -> Result<Key, String> {
    s.parse::<Key>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_special_key() {
        assert_eq!(parse_key_string("Enter").unwrap(), Key::Enter);
        assert_eq!(parse_key_string("Clear").unwrap(), Key::Clear);
    }

    #[test]
    fn test_parse_function_keys() {
        assert_eq!(parse_key_string("PF1").unwrap(), Key::Pf(1));
        assert_eq!(parse_key_string("F12").unwrap(), Key::Pf(12));
        assert_eq!(parse_key_string("pa1").unwrap(), Key::Pa(1));
    }

    #[test]
    fn test_headline_actions() {
        let config = KeybindingConfig::default();

        assert_eq!(config.headline_action(Key::Enter), HeadlineAction::Refresh);
        assert_eq!(
            config.headline_action(Key::Pf(4)),
            HeadlineAction::ChangeChannel
        );
        assert_eq!(config.headline_action(Key::Pf(3)), HeadlineAction::Quit);
        assert_eq!(config.headline_action(Key::Pf(7)), HeadlineAction::None);
    }

    #[test]
    fn test_picker_actions() {
        let config = KeybindingConfig::default();

        assert_eq!(config.picker_action(Key::Enter), PickerAction::Select);
        assert_eq!(config.picker_action(Key::Pf(2)), PickerAction::SwitchPicker);
        assert_eq!(config.picker_action(Key::Pf(3)), PickerAction::Back);
        assert_eq!(config.picker_action(Key::Pf(9)), PickerAction::Quit);
        assert_eq!(config.picker_action(Key::Clear), PickerAction::None);
    }

    #[test]
    fn test_key_sets() {
        let config = KeybindingConfig::default();

        let (accept, exit) = config.headline_keys();
        assert_eq!(accept, vec![Key::Enter, Key::Pf(4)]);
        assert_eq!(exit, vec![Key::Pf(3)]);

        let (accept, exit) = config.picker_keys();
        assert_eq!(accept, vec![Key::Enter, Key::Pf(2), Key::Pf(3)]);
        assert_eq!(exit, vec![Key::Pf(9)]);
    }

    #[test]
    fn test_clear_can_be_bound_to_quit() {
        let config: KeybindingConfig =
            toml::from_str(r#"quit = ["PF3", "Clear"]"#).unwrap();
        assert_eq!(config.headline_action(Key::Clear), HeadlineAction::Quit);
        assert_eq!(config.headline_keys().1, vec![Key::Pf(3), Key::Clear]);
        // Unset actions keep their defaults
        assert_eq!(config.change_channel, vec!["PF4"]);
    }

    #[test]
    fn test_validate_rejects_unknown_key() {
        let config = KeybindingConfig {
            back: vec!["Ctrl+x".to_string()],
            ..KeybindingConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(KeybindingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_label_uses_first_binding() {
        assert_eq!(label(&["PF3".to_string(), "Clear".to_string()]), "F3");
        assert_eq!(label(&["Enter".to_string()]), "Enter");
        assert_eq!(label(&[]), "");
    }
}
