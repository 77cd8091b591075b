use chrono::{Local, TimeZone};
use clap::Args;

use crate::context::AppContext;
use crate::domain::ticket::{
    Ticket, TicketFilters, TicketPriority, TicketStatus, parse_timestamp_in,
};
use crate::error::AppResult;
use crate::workflow::tickets::list_tickets_or_empty;

const DESCRIPTION_WIDTH: usize = 40;
const HEADERS: [&str; 7] = [
    "#",
    "Subject",
    "Description",
    "Priority",
    "Status",
    "Created",
    "Updated",
];

#[derive(Args, Debug, Clone)]
pub struct TicketsArgs {
    /// Only show tickets with this status (open, in_progress, closed, cancelled).
    #[arg(short, long, value_parser = parse_status)]
    pub status: Option<TicketStatus>,
    /// Only show tickets with this priority (low, medium, high, urgent).
    #[arg(short, long, value_parser = parse_priority)]
    pub priority: Option<TicketPriority>,
}

pub async fn run(ctx: &AppContext, args: TicketsArgs) -> AppResult<()> {
    let filters = TicketFilters {
        status: args.status,
        priority: args.priority,
    };
    let tickets = list_tickets_or_empty(ctx, filters).await;
    print!("{}", render_table(&tickets, &Local));
    Ok(())
}

fn parse_status(value: &str) -> Result<TicketStatus, String> {
    TicketStatus::parse_filter(value).ok_or_else(|| {
        let options = TicketStatus::ALL.map(|status| status.api_name());
        format!("expected one of {}", options.join(", "))
    })
}

fn parse_priority(value: &str) -> Result<TicketPriority, String> {
    TicketPriority::parse_filter(value).ok_or_else(|| {
        let options = TicketPriority::ALL.map(|priority| priority.api_name());
        format!("expected one of {}", options.join(", "))
    })
}

pub fn render_table<Tz: TimeZone>(tickets: &[Ticket], tz: &Tz) -> String {
    if tickets.is_empty() {
        return "No tickets found\n".to_string();
    }

    let rows: Vec<[String; 7]> = tickets
        .iter()
        .enumerate()
        .map(|(index, ticket)| {
            [
                (index + 1).to_string(),
                ticket.subject.clone().unwrap_or_default(),
                truncate(ticket.description.as_deref().unwrap_or(""), DESCRIPTION_WIDTH),
                ticket.priority.api_name().to_string(),
                ticket.status.api_name().replace('_', " "),
                format_date(ticket.created_at.as_deref(), tz),
                format_date(ticket.updated_at.as_deref(), tz),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(rule.join("  ").as_str());
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn truncate(text: &str, max_chars: usize) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let kept: String = flattened.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

fn format_date<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    match parse_timestamp_in(raw, tz) {
        Some(moment) => moment.naive_local().format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}
