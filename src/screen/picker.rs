use crate::config::keybindings::label;
use crate::config::KeybindingConfig;
use crate::domain::FeedCatalog;
use crate::format::{first_line, pad_center};
use crate::screen::{legend, rule, CHOICE_FIELD, ERROR_FIELD, FOOTER_RULE_ROW, NEW_URL_FIELD};
use crate::terminal::{Color, Field, Page, SCREEN_COLS};

const FIRST_ENTRY_ROW: u16 = 4;
const LAST_ENTRY_ROW: u16 = 20;
const ERROR_ROW: u16 = 21;
const URL_INPUT_COL: u16 = 11;
const URL_INPUT_LEN: u16 = 68;

/// Picker listing the catalog by URL, with the choice field next to the
/// instruction line.
pub fn feed_picker_view(catalog: &FeedCatalog, added: Option<&str>, keys: &KeybindingConfig) -> Page {
    let entries = catalog.entries().iter().map(|entry| entry.url.as_str());
    let choice = (3, 42);

    let mut page = picker_page(entries, added, keys);
    page.fields.extend([
        Field::text(3, 0, "Or choose a feed by its number below  ==>").color(Color::Blue),
        Field::input(choice.0, choice.1, CHOICE_FIELD, 2)
            .numeric()
            .underscore()
            .color(Color::Turquoise),
    ]);
    page.fields.extend(legend(&[
        (0, label(&keys.select), "Save & return"),
        (22, label(&keys.switch_picker), "Titles"),
        (45, label(&keys.back), "Return"),
        (69, label(&keys.picker_quit), "Exit"),
    ]));
    page.cursor = choice;
    page
}

/// Picker listing the catalog by channel title, with the choice field in
/// the footer.
pub fn channel_picker_view(catalog: &FeedCatalog, added: Option<&str>, keys: &KeybindingConfig) -> Page {
    let entries = catalog.entries().iter().map(|entry| entry.display_title());
    let choice = (23, 70);

    let mut page = picker_page(entries, added, keys);
    page.fields.push(
        Field::text(3, 0, "Or choose a channel by its number, entered below").color(Color::Blue),
    );
    page.fields.extend(legend(&[
        (0, label(&keys.select), "Save & return"),
        (20, label(&keys.switch_picker), "URLs"),
        (30, label(&keys.back), "Return"),
        (42, label(&keys.picker_quit), "Exit"),
    ]));
    page.fields.extend([
        Field::text(choice.0, 60, "Enter ##:").color(Color::White),
        Field::input(choice.0, choice.1, CHOICE_FIELD, 2)
            .numeric()
            .underscore()
            .color(Color::Turquoise),
    ]);
    page.cursor = choice;
    page
}

/// The layout both pickers share: header, URL input, numbered entries,
/// message line and footer rule.
fn picker_page<'a>(
    entries: impl Iterator<Item = &'a str>,
    added: Option<&'a str>,
    keys: &KeybindingConfig,
) -> Page {
    let cols = usize::from(SCREEN_COLS);
    let mut fields = vec![
        Field::text(0, 0, pad_center("Change channel", cols))
            .color(Color::White)
            .intense(),
        rule(1),
        Field::text(2, 0, "Enter URL:").color(Color::Blue),
        Field::input(2, URL_INPUT_COL, NEW_URL_FIELD, URL_INPUT_LEN)
            .underscore()
            .color(Color::Turquoise),
        // Protected stop after the URL input
        Field::text(2, URL_INPUT_COL + URL_INPUT_LEN, ""),
    ];

    let numbered = entries
        .map(|text| (text, Color::Yellow))
        .chain(added.map(|url| (url, Color::Green)))
        .enumerate()
        .map(|(i, (text, color))| (first_line(&format!("{:2}. {}", i, text), cols), color));
    for (row, (text, color)) in (FIRST_ENTRY_ROW..=LAST_ENTRY_ROW).zip(numbered) {
        fields.push(Field::text(row, 0, text).color(color));
    }

    fields.push(
        Field::output(ERROR_ROW, 0, ERROR_FIELD, SCREEN_COLS - 1)
            .color(Color::Red)
            .intense(),
    );
    fields.push(rule(FOOTER_RULE_ROW));

    let (accept_keys, exit_keys) = keys.picker_keys();
    let mut page = Page {
        fields,
        accept_keys,
        exit_keys,
        error_field: Some(ERROR_FIELD.to_string()),
        ..Page::default()
    };
    page.values.insert(CHOICE_FIELD.to_string(), "0".to_string());
    page
}
