use std::sync::Arc;

use crate::app::{AppContext, Result};
use crate::config::ServerConfig;
use crate::domain::FeedCatalog;
use crate::server::Server;
use crate::session::{run_session, SessionState};
use crate::tui::ConsoleTerminal;

pub async fn serve(ctx: Arc<AppContext>, config: &ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.bind, config.port);
    let server = Server::bind(ctx, &addr).await?;
    server.run().await
}

pub async fn console(ctx: &AppContext) -> Result<()> {
    let mut terminal = ConsoleTerminal::new()?;
    let outcome = run_session(
        &mut terminal,
        ctx,
        SessionState::new(ctx.catalog.default_url()),
    )
    .await;
    terminal.restore()?;
    outcome.map(|_| ())
}

pub fn list_feeds(ctx: &AppContext) {
    print!("{}", catalog_listing(&ctx.catalog));
}

fn catalog_listing(catalog: &FeedCatalog) -> String {
    catalog
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{:2}. {}\n    {}\n", i, entry.display_title(), entry.url))
        .collect()
}
