pub mod field;
pub mod ticket;
