use std::fmt::Write as _;

use clap::Args;

use crate::context::AppContext;
use crate::domain::summary::TicketSummary;
use crate::error::AppResult;
use crate::workflow::dashboard::build_dashboard;

const BAR_WIDTH: usize = 30;

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    /// Print the aggregated summary as JSON instead of charts.
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &AppContext, args: DashboardArgs) -> AppResult<()> {
    let summary = build_dashboard(ctx).await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render(&summary));
    }
    Ok(())
}

pub fn render(summary: &TicketSummary) -> String {
    if summary.is_empty() {
        return "No ticket data available for visualization.\n".to_string();
    }

    let mut out = String::new();
    let totals = &summary.totals;
    let _ = writeln!(
        out,
        "Total Tickets: {}   Open: {}   Closed: {}   Top Priority: {}",
        totals.total, totals.open, totals.closed, summary.dominant_priority
    );

    out.push_str("\nTicket Status Distribution\n");
    let status_rows: Vec<(String, usize)> = summary
        .status_counts
        .iter()
        .map(|(label, count)| (label.to_string(), *count))
        .collect();
    push_chart(&mut out, &status_rows, Some(totals.total));

    out.push_str("\nTickets by Priority\n");
    let priority_rows: Vec<(String, usize)> = summary
        .priority_counts
        .iter()
        .map(|(label, count)| (label.to_string(), *count))
        .collect();
    push_chart(&mut out, &priority_rows, None);

    out.push_str("\nDaily Ticket Volume\n");
    let daily_rows: Vec<(String, usize)> = summary
        .daily_counts
        .iter()
        .map(|(day, count)| (day.format("%Y-%m-%d").to_string(), *count))
        .collect();
    if daily_rows.is_empty() {
        out.push_str("  (no dated tickets)\n");
    } else {
        push_chart(&mut out, &daily_rows, None);
    }

    out
}

fn push_chart(out: &mut String, rows: &[(String, usize)], share_of: Option<usize>) {
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let count_width = rows
        .iter()
        .map(|(_, count)| count.to_string().len())
        .max()
        .unwrap_or(1);
    let max_count = rows.iter().map(|(_, count)| *count).max().unwrap_or(0);

    for (label, count) in rows {
        let share = share_of
            .filter(|total| *total > 0)
            .map(|total| format!(" {:>4}", format!("{:.0}%", *count as f64 * 100.0 / total as f64)))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {label:<label_width$}  {count:>count_width$}{share}  {}",
            bar(*count, max_count)
        );
    }
}

fn bar(count: usize, max_count: usize) -> String {
    if max_count == 0 || count == 0 {
        return String::new();
    }
    let filled = (count * BAR_WIDTH / max_count).max(1);
    "#".repeat(filled)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::domain::ticket::Ticket;

    #[test]
    fn empty_summary_renders_no_data_message() {
        let summary = TicketSummary::from_tickets(&[]);
        assert_eq!(
            render(&summary),
            "No ticket data available for visualization.\n"
        );
    }

    #[test]
    fn renders_totals_and_sections() {
        let tickets: Vec<Ticket> = serde_json::from_value(json!([
            { "status": "OPEN", "priority": "HIGH", "createdAt": "2024-01-01T10:00:00Z" },
            { "status": 2, "priority": "HIGH", "createdAt": "2024-01-02T10:00:00Z" },
            { "status": "OPEN", "priority": "LOW", "createdAt": "nope" },
            { "status": "CANCELLED", "priority": 0 }
        ]))
        .unwrap();
        let text = render(&TicketSummary::from_tickets_in(&tickets, &Utc));

        assert!(text.starts_with(
            "Total Tickets: 4   Open: 2   Closed: 1   Top Priority: High\n"
        ));
        assert!(text.contains("Ticket Status Distribution"));
        assert!(text.contains("  Open       2  50%  ##############################"));
        assert!(text.contains("Cancelled  1  25%"));
        assert!(text.contains("2024-01-01"));
        assert!(text.contains("2024-01-02"));
    }

    #[test]
    fn bars_scale_to_largest_count() {
        assert_eq!(bar(10, 10).len(), BAR_WIDTH);
        assert_eq!(bar(1, 1000), "#");
        assert_eq!(bar(0, 10), "");
    }
}
