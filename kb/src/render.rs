//! Plain-text board rendering for `kb show`

use boardstore::{Card, Status, column_cards};
use chrono::{DateTime, Local, TimeZone, Utc};
use colored::*;

/// Format a creation timestamp like `Jan 15, 10:30 AM`
pub fn format_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%b %-d, %I:%M %p").to_string()
}

/// Format a stored UTC timestamp in the local timezone
pub fn format_created(dt: &DateTime<Utc>) -> String {
    format_timestamp(&dt.with_timezone(&Local))
}

fn column_heading(status: Status, count: usize) -> ColoredString {
    let heading = format!("{} ({})", status.title(), count);
    match status {
        Status::Todo => heading.blue().bold(),
        Status::Progress => heading.yellow().bold(),
        Status::Done => heading.green().bold(),
    }
}

/// Render one column
pub fn render_column(cards: &[Card], status: Status) -> String {
    let column = column_cards(cards, status);
    let mut out = String::new();
    out.push_str(&column_heading(status, column.len()).to_string());
    out.push('\n');

    if column.is_empty() {
        out.push_str(&format!("  {}\n", "(empty)".dimmed()));
        return out;
    }

    for card in column {
        out.push_str(&format!("  {} {}\n", format!("[{}]", card.id).cyan(), card.title.bold()));
        for line in card.description.lines().filter(|l| !l.trim().is_empty()) {
            out.push_str(&format!("      {}\n", line));
        }
        out.push_str(&format!("      {}\n", format_created(&card.created_at).dimmed()));
    }
    out
}

/// Render the whole board, or a single column when `only` is set
pub fn render_board(cards: &[Card], only: Option<Status>) -> String {
    let statuses: Vec<Status> = match only {
        Some(status) => vec![status],
        None => Status::ALL.to_vec(),
    };
    statuses
        .into_iter()
        .map(|status| render_column(cards, status))
        .collect::<Vec<_>>()
        .join("\n")
}
