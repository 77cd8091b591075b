use tracing::error;

use crate::context::AppContext;
use crate::domain::ticket::{Ticket, TicketFilters};
use crate::domain::user::AccessToken;
use crate::error::{AppError, AppResult};

pub async fn list_tickets(ctx: &AppContext, filters: TicketFilters) -> AppResult<Vec<Ticket>> {
    let token = require_token(ctx)?;
    ctx.tickets.fetch_tickets(token.as_str(), &filters).await
}

/// Like [`list_tickets`], but a failed fetch is logged and read as "no
/// tickets" so callers can render their empty state.
pub async fn list_tickets_or_empty(ctx: &AppContext, filters: TicketFilters) -> Vec<Ticket> {
    match list_tickets(ctx, filters).await {
        Ok(tickets) => tickets,
        Err(err) => {
            error!(error = %err, "failed to fetch tickets");
            Vec::new()
        }
    }
}

fn require_token(ctx: &AppContext) -> AppResult<AccessToken> {
    ctx.session.load()?.ok_or_else(|| {
        AppError::Session("not signed in; run `ticketdash login` first".to_string())
    })
}
