//! Local console terminal.
//!
//! Shows pages in the current terminal with ratatui so one session can run
//! without a telnet client. Tab and BackTab move between input fields,
//! Enter, Esc (Clear) and F1-F12 (Shift for F13-F24) send the page.

pub mod event;
pub mod form;
pub mod layout;

use std::collections::HashMap;
use std::io::{self, Stdout};
use std::time::Duration;

use async_trait::async_trait;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal as RatatuiTerminal};

use crate::app::{FeedtermError, Result};
use crate::terminal::{DeviceInfo, Page, Response, Terminal};

use self::event::{AppEvent, EventHandler, FormAction};
use self::form::FormState;

type Tui = RatatuiTerminal<CrosstermBackend<Stdout>>;

/// A [`Terminal`] drawing into the process's own terminal.
pub struct ConsoleTerminal {
    terminal: Tui,
    events: EventHandler,
}

impl ConsoleTerminal {
    /// Switches the terminal to raw mode on the alternate screen.
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: setup_terminal()?,
            events: EventHandler::new(Duration::from_millis(100)),
        })
    }

    /// Gives the terminal back to the shell.
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = RatatuiTerminal::new(backend)?;
    Ok(terminal)
}

#[async_trait]
impl Terminal for ConsoleTerminal {
    async fn negotiate(&mut self) -> Result<DeviceInfo> {
        let size = self.terminal.size()?;
        Ok(DeviceInfo {
            terminal_type: "console".to_string(),
            rows: size.height,
            cols: size.width,
        })
    }

    async fn submit(&mut self, page: &Page) -> Result<Response> {
        let mut form = FormState::new(page);

        loop {
            self.terminal
                .draw(|frame| layout::render(frame, page, &form))?;

            let AppEvent::Key(key) = self.events.next()? else {
                continue;
            };

            match FormAction::from(key) {
                FormAction::Submit(key) if !page.accepts(key) => {
                    form.message = Some(format!("Key {} is not available here", key));
                }
                FormAction::Submit(key) if page.is_exit_key(key) => {
                    return Ok(Response {
                        key,
                        values: HashMap::new(),
                    });
                }
                FormAction::Submit(key) => {
                    let mut values = page.values.clone();
                    values.extend(form.edited_values());
                    return Ok(Response { key, values });
                }
                FormAction::NextField => form.next_field(),
                FormAction::PrevField => form.prev_field(),
                FormAction::Input(c) => form.insert(c),
                FormAction::Backspace => form.backspace(),
                FormAction::Interrupt => {
                    return Err(FeedtermError::Protocol("Interrupted".into()));
                }
                FormAction::None => {}
            }
        }
    }
}
