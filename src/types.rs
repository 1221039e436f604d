use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A directory record. Absent source attributes are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Major for students; the card backends put the job title here
    pub major: String,
    pub level: String,
}

impl Person {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Major => &self.major,
            Field::Level => &self.level,
        }
    }

    /// Comma-separated values of `fields`, in order
    pub fn render(&self, fields: &[Field]) -> String {
        fields
            .iter()
            .map(|f| self.field(*f))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.id, self.name, self.email, self.major, self.level
        )
    }
}

/// The Person fields a backend is able to populate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Email,
    Major,
    Level,
}

/// Attribute set of a directory entry, keyed by attribute name
pub type EntryAttributes = BTreeMap<String, Vec<String>>;

/// The unparsed response a person was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord {
    Entry(EntryAttributes),
    Card(String),
}

impl fmt::Display for RawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawRecord::Entry(attrs) => {
                let json = serde_json::to_string_pretty(attrs).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
            RawRecord::Card(text) => write!(f, "{}", text.trim_end()),
        }
    }
}

/// A successful single lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub person: Person,
    pub raw: RawRecord,
}

/// Resolution of one submitted query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Resolved(Person),
    /// No entry matched; carries the query as submitted
    Missing(String),
    /// The transport failed for this query
    Failed { query: String, reason: String },
}

impl LookupOutcome {
    /// Project one field, falling back to the raw query for unresolved outcomes
    pub fn project(&self, field: Field) -> &str {
        match self {
            LookupOutcome::Resolved(person) => person.field(field),
            LookupOutcome::Missing(query) | LookupOutcome::Failed { query, .. } => query,
        }
    }

    /// Full record over `fields`, or the raw query for unresolved outcomes
    pub fn render(&self, fields: &[Field]) -> String {
        match self {
            LookupOutcome::Resolved(person) => person.render(fields),
            LookupOutcome::Missing(query) | LookupOutcome::Failed { query, .. } => query.clone(),
        }
    }
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupOutcome::Resolved(person) => write!(f, "{}", person),
            LookupOutcome::Missing(query) | LookupOutcome::Failed { query, .. } => {
                write!(f, "{}", query)
            }
        }
    }
}

/// Outcomes of a batch, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub outcomes: Vec<LookupOutcome>,
}

impl BatchResult {
    pub fn new(outcomes: Vec<LookupOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn resolved(&self) -> impl Iterator<Item = &Person> {
        self.outcomes.iter().filter_map(|o| match o {
            LookupOutcome::Resolved(person) => Some(person),
            _ => None,
        })
    }

    pub fn missing(&self) -> BTreeSet<String> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                LookupOutcome::Missing(query) => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn failed(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                LookupOutcome::Failed { query, reason } => Some((query.as_str(), reason.as_str())),
                _ => None,
            })
            .collect()
    }
}
