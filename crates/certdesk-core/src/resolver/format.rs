//! Text conventions shared by all answers: `**Header:**` markers, `•` bullets, literal newlines.

use crate::knowledge::Office;

/// Placeholder for a metadata field the knowledge base does not carry.
pub const NOT_AVAILABLE: &str = "Information not available";

pub(super) const BULLET: &str = "•";

pub(super) fn header(label: &str) -> String {
    format!("**{}:**", label)
}

pub(super) fn bullet(text: &str) -> String {
    format!("{} {}", BULLET, text)
}

pub(super) fn field(label: &str, value: Option<&str>) -> String {
    format!("**{}:** {}", label, value.unwrap_or(NOT_AVAILABLE))
}

pub(super) fn office_lines(office: &Office) -> Vec<String> {
    vec![
        bullet(&format!("Location: {}", office.address())),
        bullet(&format!("Hours: {} ({})", office.hours, office.days)),
        bullet(&format!("Contact: {}", office.contact)),
    ]
}
