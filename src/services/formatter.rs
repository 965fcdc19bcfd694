use crate::domain::ticket::Ticket;
use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(ExportFormat::Text),
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    /// Suffix appended to the input file stem when exporting to a file.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ExportFormat::Text => "-ticket-data.txt",
            ExportFormat::Csv => "-ticket-data.csv",
            ExportFormat::Json => "-ticket-data.json",
        }
    }

    /// Whether the format goes to a file unless told otherwise.
    pub fn exports_to_file(&self) -> bool {
        matches!(self, ExportFormat::Csv)
    }
}

pub trait TicketFormatter: Send + Sync {
    fn format(&self, tickets: &[Ticket]) -> AppResult<String>;
}
