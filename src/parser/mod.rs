//! Converts raw directory responses into [`Person`] records.

pub mod entry;
pub mod vcard;

pub use entry::EntryParser;
pub use vcard::VcardParser;

use crate::types::Person;

pub trait RecordParser {
    type Raw: ?Sized;

    /// Build a person from a raw response, or `None` when it holds no record.
    fn parse(&self, raw: &Self::Raw) -> Option<Person>;
}
