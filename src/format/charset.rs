//! Transliteration to the character repertoire the terminal can display.
//!
//! The terminal side only carries a restricted code page, so diacritics and
//! typographic punctuation are folded to their nearest 7-bit equivalents
//! before text reaches a screen. Characters without an entry pass through
//! unchanged.

/// Replacement for a single character, or `None` when it passes through.
fn substitute(c: char) -> Option<&'static str> {
    let replacement = match c {
        'å' => "aa",
        'ø' => "oe",
        'æ' => "ae",
        'Å' => "AA",
        'Ø' => "OE",
        'Æ' => "AE",
        '–' | '—' => "-",
        '’' | '‘' | '`' | '»' | '«' => "'",
        '€' => "",
        '\u{00ad}' => "",
        'é' => "e",
        'Ö' => "Oe",
        'ö' => "oe",
        'Ä' => "Ae",
        'ä' => "ae",
        'Á' => "A",
        'ü' => "ue",
        _ => return None,
    };
    Some(replacement)
}

/// Applies the substitution table in a single left-to-right pass.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match substitute(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}
