use super::RecordParser;
use crate::constants::{ATTR_DISPLAY_NAME, ATTR_MAIL, ATTR_MAJOR, ATTR_STUDENT_LEVEL, ATTR_UID};
use crate::types::{EntryAttributes, Person};

/// Reads the protocol backend's named attributes off an entry.
pub struct EntryParser;

impl EntryParser {
    pub fn new() -> Self {
        Self
    }

    /// Attribute names are case-insensitive in the directory schema; multiple values are
    /// joined with `"; "`. Absent attributes yield an empty string.
    fn attribute(attrs: &EntryAttributes, name: &str) -> String {
        attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.join("; "))
            .unwrap_or_default()
    }
}

impl Default for EntryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser for EntryParser {
    type Raw = EntryAttributes;

    fn parse(&self, attrs: &EntryAttributes) -> Option<Person> {
        if attrs.is_empty() {
            return None;
        }
        Some(Person {
            id: Self::attribute(attrs, ATTR_UID),
            name: Self::attribute(attrs, ATTR_DISPLAY_NAME),
            email: Self::attribute(attrs, ATTR_MAIL),
            major: Self::attribute(attrs, ATTR_MAJOR),
            level: Self::attribute(attrs, ATTR_STUDENT_LEVEL),
        })
    }
}
