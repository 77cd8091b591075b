use crate::context::AppContext;
use crate::domain::summary::TicketSummary;
use crate::domain::ticket::TicketFilters;
use crate::workflow::tickets::list_tickets_or_empty;

/// Fetches the full ticket snapshot once and aggregates it.
///
/// Any fetch failure is logged and rendered as an empty dashboard instead of
/// surfacing as an error.
pub async fn build_dashboard(ctx: &AppContext) -> TicketSummary {
    let tickets = list_tickets_or_empty(ctx, TicketFilters::default()).await;
    TicketSummary::from_tickets(&tickets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::testing::{FakeAuth, FakeTickets, context_with, signed_in};

    #[tokio::test]
    async fn aggregates_fetched_tickets() {
        let (ctx, _dir) = context_with(FakeAuth::rejecting(), FakeTickets::with_count(3));
        signed_in(&ctx, "tok");

        let summary = build_dashboard(&ctx).await;
        assert_eq!(summary.totals.total, 3);
        assert_eq!(summary.totals.open, 3);
    }

    #[tokio::test]
    async fn fetch_failure_renders_empty_dashboard() {
        let (ctx, _dir) = context_with(FakeAuth::rejecting(), FakeTickets::failing());
        signed_in(&ctx, "tok");

        let summary = build_dashboard(&ctx).await;
        assert!(summary.is_empty());
        assert_eq!(summary.dominant_priority, "N/A");
    }

    #[tokio::test]
    async fn missing_session_renders_empty_dashboard() {
        let tickets = FakeTickets::with_count(5);
        let (ctx, _dir) = context_with(FakeAuth::rejecting(), tickets.clone());

        let summary = build_dashboard(&ctx).await;
        assert!(summary.is_empty());
        assert!(tickets.calls().is_empty());
    }
}
