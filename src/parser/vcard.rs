use super::RecordParser;
use crate::constants::{CARD_EMAIL, CARD_NAME, CARD_TITLE};
use crate::types::Person;
use std::collections::HashMap;
use tracing::debug;

/// Parses the line-oriented `KEY:value` contact-card format.
///
/// Keys lose any `;PARAM=...` suffix and are upper-cased, so `email;type=work` is read as
/// `EMAIL`. When a key repeats, the last line wins. A card without `FN` or `EMAIL` still
/// produces a person with those fields empty.
pub struct VcardParser {
    include_title: bool,
}

impl VcardParser {
    /// Reads `FN`, `EMAIL` and `TITLE` (into `major`).
    pub fn new() -> Self {
        Self { include_title: true }
    }

    /// Reads only `FN` and `EMAIL`.
    pub fn without_title() -> Self {
        Self {
            include_title: false,
        }
    }

    pub fn fields(document: &str) -> HashMap<String, String> {
        let mut fields = HashMap::new();
        for line in document.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.split(';').next().unwrap_or_default().trim();
            if key.is_empty() {
                continue;
            }
            fields.insert(key.to_ascii_uppercase(), value.trim().to_string());
        }
        fields
    }
}

impl Default for VcardParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser for VcardParser {
    type Raw = str;

    fn parse(&self, document: &str) -> Option<Person> {
        let mut fields = Self::fields(document);

        let recognized = [CARD_NAME, CARD_EMAIL, CARD_TITLE];
        if !recognized.iter().any(|key| fields.contains_key(*key)) {
            return None;
        }

        for required in [CARD_NAME, CARD_EMAIL] {
            if !fields.contains_key(required) {
                debug!(key = required, "Contact card missing field, defaulting to empty");
            }
        }

        let mut take = |key: &str| fields.remove(key).unwrap_or_default();
        let name = take(CARD_NAME);
        let email = take(CARD_EMAIL);
        let major = if self.include_title {
            take(CARD_TITLE)
        } else {
            String::new()
        };

        Some(Person {
            name,
            email,
            major,
            ..Person::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Jane Doe\r\nEMAIL:jane@example.edu\r\nTITLE:Undergraduate\r\nEND:VCARD\r\n";

    #[test]
    fn test_parse_basic_card() {
        let person = VcardParser::new().parse(CARD).unwrap();
        assert_eq!(person.name, "Jane Doe");
        assert_eq!(person.email, "jane@example.edu");
        assert_eq!(person.major, "Undergraduate");
        assert_eq!(person.id, "");
    }

    #[test]
    fn test_without_title_ignores_title() {
        let person = VcardParser::without_title().parse(CARD).unwrap();
        assert_eq!(person.major, "");
        assert_eq!(person.name, "Jane Doe");
    }

    #[test]
    fn test_parameter_suffix_stripped_from_key() {
        let card = "FN:Jane Doe\nEMAIL;TYPE=work:jane@example.edu\n";
        let person = VcardParser::new().parse(card).unwrap();
        assert_eq!(person.email, "jane@example.edu");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let card = "FN:Jane Doe\nEMAIL:old@example.edu\nEMAIL;TYPE=home:new@example.edu\n";
        let person = VcardParser::new().parse(card).unwrap();
        assert_eq!(person.email, "new@example.edu");
    }

    #[test]
    fn test_value_split_on_first_colon_only() {
        let fields = VcardParser::fields("URL:https://example.edu/jane\n");
        assert_eq!(fields["URL"], "https://example.edu/jane");
    }

    #[test]
    fn test_missing_required_field_is_tolerated() {
        let person = VcardParser::new().parse("FN:No Email\n").unwrap();
        assert_eq!(person.name, "No Email");
        assert_eq!(person.email, "");
    }

    #[test]
    fn test_document_without_card_fields_is_not_found() {
        assert!(VcardParser::new().parse("<html><body>Not found</body></html>").is_none());
        assert!(VcardParser::new().parse("").is_none());
    }
}
