pub mod document_store;
pub mod formatter;

pub use document_store::DocumentStore;
pub use formatter::{ExportFormat, TicketFormatter};
