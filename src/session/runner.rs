use chrono::Utc;
use tracing::debug;

use crate::app::{AppContext, Result};
use crate::format::{headline_lines, normalize};
use crate::screen::{channel_picker_view, feed_picker_view, headline_view};
use crate::session::machine::StateMachine;
use crate::session::state::{PickerKind, SessionState, View};
use crate::terminal::{Page, Terminal};

/// Drives one session on `terminal` until the user exits.
///
/// Every headline view fetches the current feed again. Terminal errors end
/// the session and are returned to the caller; fetch errors are shown as a
/// headline instead.
pub async fn run_session<T>(terminal: &mut T, ctx: &AppContext, mut state: SessionState) -> Result<SessionState>
where
    T: Terminal + ?Sized,
{
    let machine = StateMachine::new(&ctx.catalog, &ctx.keybindings, ctx.default_picker);
    let mut view = View::Headlines;

    loop {
        let page = match view {
            View::Headlines => headlines_page(ctx, &state).await,
            View::Picker(PickerKind::Feeds) => feed_picker_view(
                &ctx.catalog,
                state.pending_new_url.as_deref(),
                &ctx.keybindings,
            ),
            View::Picker(PickerKind::Channels) => channel_picker_view(
                &ctx.catalog,
                state.pending_new_url.as_deref(),
                &ctx.keybindings,
            ),
            View::Exit => return Ok(state),
        };

        let response = terminal.submit(&page).await?;
        let result = machine.transition(view, state, &response);
        debug!(
            from = %view,
            to = %result.next,
            key = %response.key,
            url = %result.state.current_url,
            "View transition"
        );

        view = result.next;
        state = result.state;
    }
}

async fn headlines_page(ctx: &AppContext, state: &SessionState) -> Page {
    let read = ctx.reader.read(&state.current_url).await;

    let lines = match &read.error {
        Some(e) => vec![normalize(&format!("Error fetching feed: {}", e))],
        None => headline_lines(&read.snapshot.headlines, ctx.shortener.as_deref()).await,
    };

    headline_view(&read.snapshot.title, &lines, Utc::now(), &ctx.keybindings)
}
