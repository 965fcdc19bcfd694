pub mod cmd;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod extract;
pub mod infra;
pub mod logging;
pub mod services;
pub mod workflow;

pub use domain::ticket::Ticket;
pub use extract::{ExtractError, ExtractResult, extract, extract_bytes};
