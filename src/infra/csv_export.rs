use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::services::TicketFormatter;

const HEADER: &str = "Ticket ID,Description,Details,Resolution\n";

/// CSV sheet with every cell quoted and line breaks flattened to spaces.
pub struct CsvReport;

impl TicketFormatter for CsvReport {
    fn format(&self, tickets: &[Ticket]) -> AppResult<String> {
        let mut wtr = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(vec![]);

        for ticket in tickets {
            let description = flatten_lines(&ticket.description);
            let details = flatten_lines(&ticket.details);
            let resolution = flatten_lines(&ticket.resolution);
            wtr.write_record([
                ticket.ticket_id.as_str(),
                description.as_str(),
                details.as_str(),
                resolution.as_str(),
            ])?;
        }

        let rows = wtr
            .into_inner()
            .map_err(|err| AppError::Export(format!("failed to flush csv: {err}")))?;
        let rows = String::from_utf8(rows)
            .map_err(|err| AppError::Export(format!("csv output is not UTF-8: {err}")))?;

        Ok(format!("{HEADER}{rows}"))
    }
}

fn flatten_lines(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
