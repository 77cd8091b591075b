use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, TimeZone};
use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::ticket::{Ticket, TicketStatus};

pub const NO_DOMINANT_PRIORITY: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketTotals {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
}

/// Count summaries of a ticket snapshot, as consumed by the dashboard.
///
/// `status_counts` and `priority_counts` keep the order in which each label
/// first appeared in the input. `daily_counts` is keyed by calendar date and
/// therefore always ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummary {
    pub status_counts: IndexMap<&'static str, usize>,
    pub priority_counts: IndexMap<&'static str, usize>,
    pub daily_counts: BTreeMap<NaiveDate, usize>,
    pub totals: TicketTotals,
    pub dominant_priority: &'static str,
}

impl TicketSummary {
    /// Aggregates using the local day boundary for `daily_counts`.
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        Self::from_tickets_in(tickets, &Local)
    }

    pub fn from_tickets_in<Tz: TimeZone>(tickets: &[Ticket], tz: &Tz) -> Self {
        let mut status_counts = IndexMap::new();
        let mut priority_counts = IndexMap::new();
        let mut daily_counts = BTreeMap::new();

        for ticket in tickets {
            *status_counts.entry(ticket.status.label()).or_insert(0) += 1;
            *priority_counts.entry(ticket.priority.label()).or_insert(0) += 1;
            // Unparseable creation times only drop out of the trend.
            if let Some(day) = ticket.created_on_in(tz) {
                *daily_counts.entry(day).or_insert(0) += 1;
            }
        }

        let totals = TicketTotals {
            total: tickets.len(),
            open: status_counts
                .get(TicketStatus::Open.label())
                .copied()
                .unwrap_or(0),
            closed: status_counts
                .get(TicketStatus::Closed.label())
                .copied()
                .unwrap_or(0),
        };
        let dominant_priority = dominant_label(&priority_counts);

        Self {
            status_counts,
            priority_counts,
            daily_counts,
            totals,
            dominant_priority,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.total == 0
    }
}

// Strictly-greater comparison keeps the earliest label on ties.
fn dominant_label(counts: &IndexMap<&'static str, usize>) -> &'static str {
    let mut best: Option<(&'static str, usize)> = None;
    for (&label, &count) in counts {
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label).unwrap_or(NO_DOMINANT_PRIORITY)
}
