use crate::domain::ticket::Ticket;
use crate::error::AppResult;
use crate::services::TicketFormatter;

pub struct JsonReport;

impl TicketFormatter for JsonReport {
    fn format(&self, tickets: &[Ticket]) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(tickets)?)
    }
}
