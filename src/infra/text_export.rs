use std::fmt::Write as _;

use crate::domain::field::TicketField;
use crate::domain::ticket::Ticket;
use crate::error::AppResult;
use crate::services::TicketFormatter;

/// Plain-text report meant for pasting into chat or email.
pub struct TextReport;

impl TicketFormatter for TextReport {
    fn format(&self, tickets: &[Ticket]) -> AppResult<String> {
        if tickets.is_empty() {
            return Ok("No tickets found".to_string());
        }

        let mut out = String::from("Ticket Information Table\n");
        out.push_str(&"=".repeat(46));
        out.push_str("\n\n");

        for (index, ticket) in tickets.iter().enumerate() {
            let _ = writeln!(out, "Ticket #{}: {}", index + 1, ticket.ticket_id);
            out.push_str(&"-".repeat(60));
            out.push('\n');

            for field in TicketField::ALL {
                let label = field.label();
                let value = ticket.field(field).trim();
                let _ = writeln!(out, "{label}:");
                out.push_str(&"-".repeat(label.len() + 1));
                out.push('\n');
                let _ = writeln!(
                    out,
                    "{}\n",
                    if value.is_empty() { "Not provided" } else { value }
                );
            }

            out.push_str(&"=".repeat(60));
            out.push_str("\n\n");
        }

        Ok(out)
    }
}
