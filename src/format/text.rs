//! Fixed-width layout helpers.
//!
//! All widths are counted in `char`s; text is expected to have been through
//! [`normalize`](super::normalize) so one char is one terminal column.

/// Horizontal alignment for [`pad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Width the title is cut or padded to when a short link follows it.
pub const LINK_TITLE_WIDTH: usize = 45;

/// Control characters would move the cursor instead of taking a column.
fn printable(c: char) -> char {
    if c.is_control() {
        ' '
    } else {
        c
    }
}

/// Pads `text` to exactly `width` columns, truncating when it is wider.
/// Control characters become spaces.
pub fn pad(text: &str, width: usize, align: Align) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).map(printable).collect();
    }

    let (left, right) = match align {
        Align::Left => (0, width - len),
        Align::Center => {
            let left = (width - len) / 2;
            (left, width - len - left)
        }
    };

    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n(' ', left));
    out.extend(text.chars().map(printable));
    out.extend(std::iter::repeat_n(' ', right));
    out
}

pub fn pad_right(text: &str, width: usize) -> String {
    pad(text, width, Align::Left)
}

pub fn pad_center(text: &str, width: usize) -> String {
    pad(text, width, Align::Center)
}

/// Splits `text` into lines of exactly `width` columns.
///
/// Lines break at the last space that keeps the line within `width`;
/// a word longer than the line is cut at the boundary. Newlines and other
/// control characters are treated as spaces. The last line is always
/// emitted, even when empty.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut rest: Vec<char> = text.chars().map(printable).collect();

    while rest.len() > width {
        let cut = rest[..=width]
            .iter()
            .rposition(|&c| c == ' ')
            .filter(|&idx| idx > 0)
            .unwrap_or(width);

        let line: String = rest[..cut].iter().collect();
        lines.push(pad_right(&line, width));

        let remainder: String = rest[cut..].iter().collect();
        rest = remainder.trim().chars().collect();
    }

    let last: String = rest.into_iter().collect();
    lines.push(pad_right(&last, width));
    lines
}

/// The first line [`wrap`] would produce; used where entries never wrap.
pub fn first_line(text: &str, width: usize) -> String {
    wrap(text, width)
        .into_iter()
        .next()
        .unwrap_or_else(|| pad_right("", width))
}

/// `title` cut or padded to [`LINK_TITLE_WIDTH`], followed by the link.
pub fn with_link(title: &str, link: &str) -> String {
    format!("{} {}", pad_right(title, LINK_TITLE_WIDTH), link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("abc", 6), "abc   ");
        assert_eq!(pad_right("abcdef", 3), "abc");
        assert_eq!(pad_right("", 2), "  ");
    }

    #[test]
    fn test_pad_center_extra_space_on_right() {
        assert_eq!(pad_center("ab", 5), " ab  ");
        assert_eq!(pad_center("abc", 5), " abc ");
        assert_eq!(pad_center("RSS Feed", 80).len(), 80);
        assert_eq!(pad_center("toolong", 4), "tool");
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap("hello", 10), vec!["hello     "]);
    }

    #[test]
    fn test_wrap_breaks_at_last_space() {
        let lines = wrap("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick ", "brown fox ", "jumps     "]);
    }

    #[test]
    fn test_wrap_space_right_after_boundary_keeps_full_word() {
        let lines = wrap("aaaa bbbb cccc", 9);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc     "]);
    }

    #[test]
    fn test_wrap_hard_breaks_long_word() {
        let lines = wrap("abcdefghijkl", 5);
        assert_eq!(lines, vec!["abcde", "fghij", "kl   "]);
    }

    #[test]
    fn test_wrap_newlines_become_spaces() {
        assert_eq!(wrap("one\ntwo", 8), vec!["one two "]);
    }

    #[test]
    fn test_wrap_control_characters_become_spaces() {
        let lines = wrap("<html>\r\n<body>\tBad\x1b[2J gateway</body>", 20);
        for line in &lines {
            assert!(!line.chars().any(char::is_control), "{:?}", line);
            assert_eq!(line.chars().count(), 20);
        }
        assert_eq!(lines[0], "<html>  <body> Bad  ");
    }

    #[test]
    fn test_pad_strips_control_characters() {
        assert_eq!(pad_right("a\rb", 4), "a b ");
        assert_eq!(pad_center("x\ty", 3), "x y");
    }

    #[test]
    fn test_wrap_empty_emits_one_blank_line() {
        assert_eq!(wrap("", 4), vec!["    "]);
        assert_eq!(wrap("anything", 0), vec![""]);
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        let lines = wrap("ïïïïï ïïïïï", 6);
        assert_eq!(lines, vec!["ïïïïï ", "ïïïïï "]);
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("one two three", 8), "one two ");
        assert_eq!(first_line("short", 8), "short   ");
    }

    #[test]
    fn test_with_link_pads_short_title() {
        let line = with_link("Short title", "https://tinyurl.com/abc");
        assert_eq!(line.len(), LINK_TITLE_WIDTH + 1 + "https://tinyurl.com/abc".len());
        assert!(line.starts_with("Short title "));
        assert!(line.ends_with(" https://tinyurl.com/abc"));
    }

    #[test]
    fn test_with_link_truncates_long_title() {
        let title = "x".repeat(60);
        let line = with_link(&title, "https://is.gd/q");
        assert_eq!(line, format!("{} https://is.gd/q", "x".repeat(45)));
    }

    proptest! {
        #[test]
        fn prop_wrap_lines_have_exact_width(
            words in prop::collection::vec("[a-z]{1,15}", 0..20),
            width in 1usize..40,
        ) {
            let text = words.join(" ");
            for line in wrap(&text, width) {
                prop_assert_eq!(line.chars().count(), width);
            }
        }

        #[test]
        fn prop_wrap_preserves_content(
            words in prop::collection::vec("[a-z]{1,15}", 0..20),
            width in 1usize..40,
        ) {
            let text = words.join(" ");
            let joined: String = wrap(&text, width)
                .iter()
                .map(|l| l.trim())
                .collect::<Vec<_>>()
                .join(" ");
            let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
            prop_assert_eq!(squash(&joined), squash(&text));
        }

        #[test]
        fn prop_wrap_never_splits_words_that_fit(
            words in prop::collection::vec("[a-z]{1,8}", 1..20),
            width in 8usize..40,
        ) {
            let text = words.join(" ");
            for line in wrap(&text, width) {
                for word in line.split_whitespace() {
                    prop_assert!(words.iter().any(|w| w == word), "split word {}", word);
                }
            }
        }

        #[test]
        fn prop_pad_is_idempotent(s in "[ -~]{0,50}", width in 0usize..60) {
            let left = pad(&s, width, Align::Left);
            prop_assert_eq!(pad(&left, width, Align::Left), left.clone());
            let center = pad(&s, width, Align::Center);
            prop_assert_eq!(pad(&center, width, Align::Center), center.clone());
            prop_assert_eq!(left.chars().count(), width);
        }
    }
}
