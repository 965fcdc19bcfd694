use serde::{Deserialize, Serialize};

use crate::domain::field::TicketField;

/// A single ticket pulled out of an export dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub ticket_id: String,
    pub comp_id: String,
    pub description: String,
    pub details: String,
    pub resolution: String,
}

impl Ticket {
    pub fn new(ticket_id: impl Into<String>, comp_id: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            comp_id: comp_id.into(),
            ..Self::default()
        }
    }

    pub fn field(&self, field: TicketField) -> &str {
        match field {
            TicketField::Description => &self.description,
            TicketField::Details => &self.details,
            TicketField::Resolution => &self.resolution,
        }
    }

    pub fn assign(&mut self, field: TicketField, content: &str) {
        let slot = match field {
            TicketField::Description => &mut self.description,
            TicketField::Details => &mut self.details,
            TicketField::Resolution => &mut self.resolution,
        };
        *slot = content.to_string();
    }
}
