//! Line-mode telnet terminal.
//!
//! Pages are drawn as plain text with ANSI clear-screen, and each
//! submission reads one input line:
//!
//! ```text
//! PF3                     press F3
//! 2                       type 2 into the numeric input field, press Enter
//! https://x.example/rss   type into the first text input field, press Enter
//! name=value PF2          set a named field, press F2
//! ```
//!
//! An empty line is a plain Enter. A `name=value` token only sets a field
//! when `name` is one of the page's input fields, so bare URLs with query
//! strings still land in the text input.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::app::{FeedtermError, Result};
use crate::terminal::{DeviceInfo, Field, Key, Page, Response, Terminal};

const IAC: u8 = 255;
const DONT: u8 = 254;
const DO: u8 = 253;
const WONT: u8 = 252;
const WILL: u8 = 251;
const SB: u8 = 250;
const SE: u8 = 240;
const NAWS: u8 = 31;

/// How long negotiation waits for the client to report its window size.
const NEGOTIATION_TIMEOUT: Duration = Duration::from_secs(2);

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Longest input line accepted, in bytes.
const MAX_LINE_LEN: usize = 4096;

#[derive(Debug, Default)]
enum TelnetState {
    #[default]
    Data,
    Iac,
    Command(u8),
    Sub(Vec<u8>),
    SubIac(Vec<u8>),
}

/// Strips telnet commands from the byte stream and records NAWS reports.
#[derive(Debug, Default)]
struct TelnetFilter {
    state: TelnetState,
    window: Option<(u16, u16)>,
    naws_refused: bool,
}

impl TelnetFilter {
    /// Feeds one byte; returns it when it is user data.
    fn feed(&mut self, byte: u8) -> Option<u8> {
        match std::mem::take(&mut self.state) {
            TelnetState::Data => {
                if byte == IAC {
                    self.state = TelnetState::Iac;
                    None
                } else {
                    Some(byte)
                }
            }
            TelnetState::Iac => match byte {
                IAC => Some(IAC),
                WILL | WONT | DO | DONT => {
                    self.state = TelnetState::Command(byte);
                    None
                }
                SB => {
                    self.state = TelnetState::Sub(Vec::new());
                    None
                }
                _ => None,
            },
            TelnetState::Command(command) => {
                if byte == NAWS && command == WONT {
                    self.naws_refused = true;
                }
                None
            }
            TelnetState::Sub(mut buf) => {
                if byte == IAC {
                    self.state = TelnetState::SubIac(buf);
                } else {
                    buf.push(byte);
                    self.state = TelnetState::Sub(buf);
                }
                None
            }
            TelnetState::SubIac(mut buf) => {
                match byte {
                    SE => self.end_subnegotiation(&buf),
                    IAC => {
                        buf.push(IAC);
                        self.state = TelnetState::Sub(buf);
                    }
                    _ => {}
                }
                None
            }
        }
    }

    fn end_subnegotiation(&mut self, buf: &[u8]) {
        if let [NAWS, w1, w2, h1, h2, ..] = *buf {
            let cols = u16::from_be_bytes([w1, w2]);
            let rows = u16::from_be_bytes([h1, h2]);
            self.window = Some((cols, rows));
        }
    }
}

/// A [`Terminal`] speaking plain text over a telnet connection.
pub struct LineTerminal<S> {
    stream: S,
    filter: TelnetFilter,
    pending: Vec<u8>,
}

impl<S> LineTerminal<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            filter: TelnetFilter::default(),
            pending: Vec::new(),
        }
    }

    /// Reads once from the stream, filtering telnet commands into `pending`.
    /// Returns `false` at end of stream.
    async fn fill(&mut self) -> Result<bool> {
        let mut buf = [0u8; 512];
        let n = self.stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(false);
        }
        for &byte in &buf[..n] {
            if let Some(data) = self.filter.feed(byte) {
                self.pending.push(data);
            }
        }
        Ok(true)
    }

    /// Next input line without its terminator, or `None` once the peer closed.
    async fn read_line(&mut self) -> Result<Option<String>> {
        let mut scanned = 0;
        loop {
            if let Some(offset) = self.pending[scanned..].iter().position(|&b| b == b'\n') {
                let pos = scanned + offset;
                if pos > MAX_LINE_LEN {
                    return Err(FeedtermError::Protocol("Input line too long".into()));
                }
                let line: Vec<u8> = self.pending.drain(..=pos).collect();
                let text = String::from_utf8_lossy(&line)
                    .trim_end_matches(['\r', '\n', '\0'])
                    .to_string();
                return Ok(Some(text));
            }
            scanned = self.pending.len();
            if scanned > MAX_LINE_LEN {
                return Err(FeedtermError::Protocol("Input line too long".into()));
            }
            if !self.fill().await? {
                return Ok(None);
            }
        }
    }

    async fn draw(&mut self, page: &Page, message: Option<&str>) -> Result<()> {
        let mut overrides = HashMap::new();
        let mut trailer = String::new();
        if let Some(message) = message {
            match &page.error_field {
                Some(name) => {
                    overrides.insert(name.clone(), message.to_string());
                }
                None => trailer = format!("{}\r\n", message),
            }
        }

        let mut out = String::from(CLEAR_SCREEN);
        for row in page.text_grid(&overrides) {
            out.push_str(row.trim_end());
            out.push_str("\r\n");
        }
        out.push_str(&trailer);
        out.push_str("> ");

        self.stream.write_all(out.as_bytes()).await?;
        self.stream.flush().await?;
        Ok(())
    }
}

/// Splits an input line into the key pressed and the field values typed.
fn parse_input(page: &Page, line: &str) -> std::result::Result<(Key, HashMap<String, String>), String> {
    let mut key = Key::Enter;
    let mut values = HashMap::new();

    for token in line.split_whitespace() {
        if let Ok(parsed) = token.parse::<Key>() {
            key = parsed;
        } else if let Some((field, value)) = named_assignment(page, token) {
            if let Some(name) = &field.name {
                values.insert(name.clone(), clip(field.width(), value));
            }
        } else {
            let numeric = token.chars().all(|c| c.is_ascii_digit());
            let field = page
                .input_fields()
                .find(|f| f.numeric == numeric)
                .ok_or_else(|| format!("Nowhere to put {:?}", token))?;
            if let Some(name) = &field.name {
                values.insert(name.clone(), clip(field.width(), token));
            }
        }
    }

    Ok((key, values))
}

/// Splits `name=value` when `name` is one of the page's input fields.
fn named_assignment<'p, 't>(page: &'p Page, token: &'t str) -> Option<(&'p Field, &'t str)> {
    let (name, value) = token.split_once('=')?;
    let field = page.input_fields().find(|f| f.name.as_deref() == Some(name))?;
    Some((field, value))
}

fn clip(width: usize, value: &str) -> String {
    value.chars().take(width).collect()
}

#[async_trait]
impl<S> Terminal for LineTerminal<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn negotiate(&mut self) -> Result<DeviceInfo> {
        self.stream.write_all(&[IAC, DO, NAWS]).await?;
        self.stream.flush().await?;

        let wait = async {
            while self.filter.window.is_none() && !self.filter.naws_refused {
                if !self.fill().await? {
                    return Err(FeedtermError::Protocol(
                        "Connection closed during negotiation".into(),
                    ));
                }
            }
            Ok::<(), FeedtermError>(())
        };
        if let Ok(result) = tokio::time::timeout(NEGOTIATION_TIMEOUT, wait).await {
            result?;
        }

        let mut device = DeviceInfo {
            terminal_type: "telnet".to_string(),
            ..DeviceInfo::default()
        };
        if let Some((cols, rows)) = self.filter.window {
            device.cols = cols;
            device.rows = rows;
        }
        Ok(device)
    }

    async fn submit(&mut self, page: &Page) -> Result<Response> {
        let mut message = None;

        loop {
            self.draw(page, message.as_deref()).await?;

            let line = self
                .read_line()
                .await?
                .ok_or_else(|| FeedtermError::Protocol("Connection closed".into()))?;

            match parse_input(page, &line) {
                Ok((key, _)) if !page.accepts(key) => {
                    message = Some(format!("Key {} is not available here", key));
                }
                Ok((key, _)) if page.is_exit_key(key) => {
                    return Ok(Response {
                        key,
                        values: HashMap::new(),
                    });
                }
                Ok((key, typed)) => {
                    let mut values = page.values.clone();
                    values.extend(typed);
                    return Ok(Response { key, values });
                }
                Err(e) => message = Some(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{duplex, AsyncBufReadExt, BufReader};

    fn picker_page() -> Page {
        Page {
            fields: vec![
                Field::text(0, 0, "Header"),
                Field::input(2, 11, "newURL", 68).underscore(),
                Field::input(3, 42, "choice", 2).numeric(),
                Field::output(21, 0, "errormsg", 79),
            ],
            values: HashMap::from([("choice".to_string(), "0".to_string())]),
            accept_keys: vec![Key::Enter, Key::Pf(2), Key::Pf(3)],
            exit_keys: vec![Key::Pf(9)],
            error_field: Some("errormsg".into()),
            ..Page::default()
        }
    }

    #[test]
    fn test_filter_strips_commands_and_reads_naws() {
        let mut filter = TelnetFilter::default();
        let bytes = [
            b'a', IAC, WILL, NAWS, IAC, SB, NAWS, 0, 132, 0, 27, IAC, SE, b'b', IAC, IAC,
        ];
        let data: Vec<u8> = bytes.iter().filter_map(|&b| filter.feed(b)).collect();

        assert_eq!(data, vec![b'a', b'b', IAC]);
        assert_eq!(filter.window, Some((132, 27)));
    }

    #[test]
    fn test_filter_notes_refusal() {
        let mut filter = TelnetFilter::default();
        for b in [IAC, WONT, NAWS] {
            assert_eq!(filter.feed(b), None);
        }
        assert!(filter.naws_refused);
    }

    #[test]
    fn test_parse_input_keys_and_fields() {
        let page = picker_page();

        let (key, values) = parse_input(&page, "").unwrap();
        assert_eq!(key, Key::Enter);
        assert!(values.is_empty());

        let (key, values) = parse_input(&page, "7").unwrap();
        assert_eq!(key, Key::Enter);
        assert_eq!(values.get("choice").map(String::as_str), Some("7"));

        let (key, values) = parse_input(&page, "https://x.example/rss pf2").unwrap();
        assert_eq!(key, Key::Pf(2));
        assert_eq!(
            values.get("newURL").map(String::as_str),
            Some("https://x.example/rss")
        );

        let (_, values) = parse_input(&page, "choice=123").unwrap();
        assert_eq!(values.get("choice").map(String::as_str), Some("12"));
    }

    #[test]
    fn test_parse_input_unknown_name_is_bare_text() {
        let (_, values) = parse_input(&picker_page(), "nope=1").unwrap();
        assert_eq!(values.get("newURL").map(String::as_str), Some("nope=1"));
    }

    #[test]
    fn test_parse_input_url_with_query_string() {
        let page = picker_page();
        let url = "https://x.example/rss?format=rss&id=7";

        let (key, values) = parse_input(&page, url).unwrap();
        assert_eq!(key, Key::Enter);
        assert_eq!(values.get("newURL").map(String::as_str), Some(url));
        assert!(!values.contains_key("choice"));

        let (_, values) = parse_input(&page, &format!("newURL={}", url)).unwrap();
        assert_eq!(values.get("newURL").map(String::as_str), Some(url));
    }

    #[test]
    fn test_parse_input_nowhere_to_put_text() {
        let page = Page {
            fields: vec![Field::input(3, 42, "choice", 2).numeric()],
            ..Page::default()
        };
        assert!(parse_input(&page, "abc").is_err());
    }

    #[tokio::test]
    async fn test_negotiate_reads_window_size() {
        let (client, server) = duplex(1024);
        let mut terminal = LineTerminal::new(server);
        let (mut client_read, mut client_write) = tokio::io::split(client);

        let client_task = tokio::spawn(async move {
            let mut request = [0u8; 3];
            client_read.read_exact(&mut request).await.unwrap();
            assert_eq!(request, [IAC, DO, NAWS]);
            client_write
                .write_all(&[IAC, WILL, NAWS, IAC, SB, NAWS, 0, 80, 0, 24, IAC, SE])
                .await
                .unwrap();
        });

        let device = terminal.negotiate().await.unwrap();
        client_task.await.unwrap();
        assert_eq!(device.terminal_type, "telnet");
        assert_eq!((device.cols, device.rows), (80, 24));
    }

    #[tokio::test]
    async fn test_submit_rejects_unknown_key_then_accepts() {
        let (client, server) = duplex(64 * 1024);
        let mut terminal = LineTerminal::new(server);
        let (client_read, mut client_write) = tokio::io::split(client);

        client_write.write_all(b"PF5\r\n3 PF2\r\n").await.unwrap();
        let response = terminal.submit(&picker_page()).await.unwrap();

        assert_eq!(response.key, Key::Pf(2));
        assert_eq!(response.value("choice"), Some("3"));

        drop(terminal);
        let mut lines = BufReader::new(client_read).lines();
        let mut saw_message = false;
        while let Some(line) = lines.next_line().await.unwrap() {
            if line.contains("Key F5 is not available here") {
                saw_message = true;
            }
        }
        assert!(saw_message);
    }

    #[tokio::test]
    async fn test_exit_key_drops_input() {
        let (client, server) = duplex(64 * 1024);
        let mut terminal = LineTerminal::new(server);
        let (_client_read, mut client_write) = tokio::io::split(client);

        client_write.write_all(b"2 PF9\n").await.unwrap();
        let response = terminal.submit(&picker_page()).await.unwrap();

        assert_eq!(response.key, Key::Pf(9));
        assert!(response.values.is_empty());
    }

    #[tokio::test]
    async fn test_overlong_line_is_rejected() {
        let (client, server) = duplex(64 * 1024);
        let mut terminal = LineTerminal::new(server);
        let (_client_read, mut client_write) = tokio::io::split(client);

        client_write.write_all(&[b'a'; MAX_LINE_LEN * 2]).await.unwrap();
        let err = terminal.submit(&picker_page()).await.unwrap_err();

        assert!(matches!(err, FeedtermError::Protocol(ref m) if m == "Input line too long"));
        assert!(terminal.pending.len() <= MAX_LINE_LEN + 512);
    }

    #[tokio::test]
    async fn test_line_split_across_reads() {
        let (client, server) = duplex(64 * 1024);
        let mut terminal = LineTerminal::new(server);
        let (_client_read, mut client_write) = tokio::io::split(client);

        let writer = tokio::spawn(async move {
            client_write.write_all(b"PF").await.unwrap();
            tokio::task::yield_now().await;
            client_write.write_all(b"2\r\n").await.unwrap();
            client_write
        });

        let response = terminal.submit(&picker_page()).await.unwrap();
        assert_eq!(response.key, Key::Pf(2));
        drop(writer.await.unwrap());
    }

    #[tokio::test]
    async fn test_closed_connection_is_protocol_error() {
        let (client, server) = duplex(64 * 1024);
        let mut terminal = LineTerminal::new(server);
        drop(client);

        let err = terminal.submit(&picker_page()).await.unwrap_err();
        assert!(matches!(err, FeedtermError::Protocol(_) | FeedtermError::Io(_)));
    }
}
