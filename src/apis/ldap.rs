use crate::apis::DirectoryBackend;
use crate::app::ports::DirectoryPort;
use crate::constants::LDAP_BACKEND;
use crate::error::Result;
use crate::parser::{EntryParser, RecordParser};
use crate::query::{uid_filter, uid_or_filter};
use crate::types::{Field, Hit, Person, RawRecord};
use tracing::{info, instrument};

const LDAP_FIELDS: &[Field] = &[Field::Id, Field::Name, Field::Email, Field::Major, Field::Level];

/// Looks people up by identifier over the directory protocol.
pub struct LdapBackend {
    directory: Box<dyn DirectoryPort>,
    parser: EntryParser,
}

impl LdapBackend {
    pub fn new(directory: Box<dyn DirectoryPort>) -> Self {
        Self {
            directory,
            parser: EntryParser::new(),
        }
    }
}

#[async_trait::async_trait]
impl DirectoryBackend for LdapBackend {
    fn name(&self) -> &'static str {
        LDAP_BACKEND
    }

    fn fields(&self) -> &'static [Field] {
        LDAP_FIELDS
    }

    fn supports_batch(&self) -> bool {
        true
    }

    #[instrument(skip(self))]
    async fn lookup_one(&self, query: &str) -> Result<Option<Hit>> {
        let entries = self.directory.search(&uid_filter(query)).await?;
        let hit = entries.into_iter().next().and_then(|attrs| {
            self.parser.parse(&attrs).map(|person| Hit {
                person,
                raw: RawRecord::Entry(attrs),
            })
        });
        Ok(hit)
    }

    #[instrument(skip(self, queries), fields(count = queries.len()))]
    async fn lookup_many(&self, queries: &[String]) -> Result<Vec<Person>> {
        if queries.is_empty() {
            return Ok(Vec::new());
        }
        let entries = self.directory.search(&uid_or_filter(queries)).await?;
        let people: Vec<Person> = entries
            .iter()
            .filter_map(|attrs| self.parser.parse(attrs))
            .collect();
        info!("Directory returned {} entries", people.len());
        Ok(people)
    }
}
