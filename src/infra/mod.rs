pub mod csv_export;
pub mod fs;
pub mod json_export;
pub mod text_export;

use crate::services::{ExportFormat, TicketFormatter};

pub fn formatter_for(format: ExportFormat) -> Box<dyn TicketFormatter> {
    match format {
        ExportFormat::Text => Box::new(text_export::TextReport),
        ExportFormat::Csv => Box::new(csv_export::CsvReport),
        ExportFormat::Json => Box::new(json_export::JsonReport),
    }
}
