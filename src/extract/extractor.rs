use std::collections::HashSet;

use scraper::{ElementRef, Html};
use tracing::{debug, trace};

use crate::domain::field::FieldAttributes;
use crate::domain::ticket::Ticket;
use crate::extract::ExtractResult;
use crate::extract::markers::{MARKERS, Markers, TICKET_ID_HINT, text_of};

/// Read ticket records out of normalized HTML.
///
/// Every element whose id carries the component prefix is visited in
/// document order. Components without a recognizable ticket id are skipped,
/// and only the first record per ticket id is returned.
pub fn extract_tickets(html: &str) -> ExtractResult<Vec<Ticket>> {
    let markers: &Markers = &MARKERS;
    let document = Html::parse_document(html);

    let mut seen = HashSet::new();
    let mut tickets = Vec::new();
    let mut duplicates = 0usize;

    for component in document.select(&markers.component) {
        let Some(ticket) = read_component(markers, component) else {
            continue;
        };
        if seen.insert(ticket.ticket_id.clone()) {
            tickets.push(ticket);
        } else {
            duplicates += 1;
        }
    }

    debug!(tickets = tickets.len(), duplicates, "extracted tickets");
    Ok(tickets)
}

fn read_component(markers: &Markers, component: ElementRef<'_>) -> Option<Ticket> {
    let ticket_id = title_ticket_id(markers, component)
        .or_else(|| leaf_ticket_id(markers, component))?;
    let comp_id = component.value().id().unwrap_or_default();

    let mut ticket = Ticket::new(ticket_id, comp_id);
    for input in component.select(&markers.text_input) {
        let text = text_of(&input);
        let content = if text.is_empty() {
            input.value().attr("value").unwrap_or_default().to_string()
        } else {
            text
        };
        if content.trim().is_empty() {
            continue;
        }

        let data = input.value();
        let attributes = FieldAttributes {
            name: data.attr("name").unwrap_or_default(),
            data_caid: data.attr("data-caid").unwrap_or_default(),
            id: data.attr("id").unwrap_or_default(),
            autoidentifier: data.attr("autoidentifier").unwrap_or_default(),
        };
        for field in attributes.classify() {
            trace!(ticket = %ticket.ticket_id, field = field.as_str(), "assigned field");
            ticket.assign(field, &content);
        }
    }

    Some(ticket)
}

// A later matching title overrides an earlier one.
fn title_ticket_id(markers: &Markers, component: ElementRef<'_>) -> Option<String> {
    component
        .select(&markers.title)
        .filter_map(|title| {
            markers
                .find_ticket_id(text_of(&title).trim())
                .map(str::to_string)
        })
        .last()
}

fn leaf_ticket_id(markers: &Markers, component: ElementRef<'_>) -> Option<String> {
    component
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|element| element.children().all(|child| !child.value().is_element()))
        .find_map(|element| {
            let text = text_of(&element);
            if !text.contains(TICKET_ID_HINT) {
                return None;
            }
            markers.find_ticket_id(text.trim()).map(str::to_string)
        })
}
