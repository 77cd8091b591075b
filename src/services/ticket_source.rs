use async_trait::async_trait;

use crate::domain::ticket::{Ticket, TicketFilters};
use crate::error::AppResult;

#[async_trait]
pub trait TicketSource: Send + Sync {
    async fn fetch_tickets(&self, token: &str, filters: &TicketFilters) -> AppResult<Vec<Ticket>>;
}
