#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketField {
    Description,
    Details,
    Resolution,
}

impl TicketField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketField::Description => "description",
            TicketField::Details => "details",
            TicketField::Resolution => "resolution",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketField::Description => "Description",
            TicketField::Details => "Details",
            TicketField::Resolution => "Resolution",
        }
    }

    pub const ALL: [TicketField; 3] = [
        TicketField::Description,
        TicketField::Details,
        TicketField::Resolution,
    ];
}

/// The identifying attributes read off a text-input element. Missing
/// attributes are empty strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldAttributes<'a> {
    pub name: &'a str,
    pub data_caid: &'a str,
    pub id: &'a str,
    pub autoidentifier: &'a str,
}

impl<'a> FieldAttributes<'a> {
    fn any_contains(&self, needle: &str) -> bool {
        [self.name, self.data_caid, self.id, self.autoidentifier]
            .iter()
            .any(|value| value.contains(needle))
    }

    /// Every field this element feeds. The checks are independent, so one
    /// element can populate more than one field.
    pub fn classify(&self) -> Vec<TicketField> {
        let mut fields = Vec::with_capacity(3);

        if self.any_contains("Description")
            && !self.data_caid.contains("Long")
            && !self.name.contains("Long")
        {
            fields.push(TicketField::Description);
        }

        if self.any_contains("DescriptionLong") || self.autoidentifier.contains("Details") {
            fields.push(TicketField::Details);
        }

        if self.any_contains("Resolution") {
            fields.push(TicketField::Resolution);
        }

        fields
    }
}
