use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

/// Id prefix of the containers that hold one ticket each.
pub const COMPONENT_ID_PREFIX: &str = "ext-comp-";

/// Id of the primary tab panel, which only repeats data found elsewhere.
pub const IGNORED_PANEL_ID: &str = "ca-service-desk-ticket-center-page-primarytab";

/// Attributes that survive normalization. Everything else is noise.
pub const ALLOWED_ATTRIBUTES: [&str; 5] = ["id", "data-caid", "name", "autoidentifier", "value"];

pub(crate) const TITLE_ATTRIBUTE: &str = "data-caid";
pub(crate) const TITLE_VALUE: &str = "title";
pub(crate) const TEXT_INPUT_TAG: &str = "textarea";
pub(crate) const TICKET_ID_HINT: &str = "300-";

/// Selectors and patterns shared by both pipeline stages.
pub(crate) struct Markers {
    pub component: Selector,
    pub title: Selector,
    pub text_input: Selector,
    pub ticket_id: Regex,
}

pub(crate) static MARKERS: Lazy<Markers> = Lazy::new(|| Markers {
    component: Selector::parse(&format!(r#"[id^="{COMPONENT_ID_PREFIX}"]"#))
        .expect("valid component selector"),
    title: Selector::parse(&format!(r#"[{TITLE_ATTRIBUTE}="{TITLE_VALUE}"]"#))
        .expect("valid title selector"),
    text_input: Selector::parse(TEXT_INPUT_TAG).expect("valid text input selector"),
    ticket_id: Regex::new(r"300-\d+").expect("valid ticket id pattern"),
});

impl Markers {
    pub fn find_ticket_id<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.ticket_id.find(text).map(|found| found.as_str())
    }
}

pub(crate) fn is_title(element: &ElementRef<'_>) -> bool {
    element.value().attr(TITLE_ATTRIBUTE) == Some(TITLE_VALUE)
}

/// True when `element` or one of its ancestors is the ignored tab panel.
pub(crate) fn in_ignored_panel(element: &ElementRef<'_>) -> bool {
    element.value().id() == Some(IGNORED_PANEL_ID)
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| ancestor.value().id() == Some(IGNORED_PANEL_ID))
}

/// True when a title marker sits between `element` and `root`.
pub(crate) fn inside_title(element: &ElementRef<'_>, root: &ElementRef<'_>) -> bool {
    let root_id = (**root).id();
    element
        .ancestors()
        .take_while(|ancestor| ancestor.id() != root_id)
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_title(&ancestor))
}

pub(crate) fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect()
}
