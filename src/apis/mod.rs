//! Directory backends: one per upstream service the lookups can run against.

pub mod factory;
pub mod ldap;
pub mod search_page;
pub mod vcard_direct;

pub use factory::{create_backend, BackendKind};
pub use ldap::LdapBackend;
pub use search_page::SearchPageBackend;
pub use vcard_direct::VcardDirectBackend;

use crate::app::ports::HttpGetResult;
use crate::error::{LookupError, Result};
use crate::types::{Field, Hit, Person};

/// Core trait every directory backend implements
#[async_trait::async_trait]
pub trait DirectoryBackend: Send + Sync {
    /// Name used on the command line and in logs
    fn name(&self) -> &'static str;

    /// The person fields this backend can fill in
    fn fields(&self) -> &'static [Field];

    /// What the `major` field holds, as shown in the display menu
    fn major_label(&self) -> &'static str {
        "majors"
    }

    /// Whether `lookup_many` resolves a whole batch in one request
    fn supports_batch(&self) -> bool {
        false
    }

    /// Look up a single normalized query. `Ok(None)` means no match.
    async fn lookup_one(&self, query: &str) -> Result<Option<Hit>>;

    /// Look up many identifiers in one round trip.
    async fn lookup_many(&self, _queries: &[String]) -> Result<Vec<Person>> {
        Err(LookupError::Unsupported(self.name()))
    }
}

/// 5xx responses are failures of the service, anything else is left to the parser.
pub(crate) fn reject_server_error(resp: &HttpGetResult, url: &str) -> Result<()> {
    if resp.status >= 500 {
        return Err(LookupError::Status {
            status: resp.status,
            url: url.to_string(),
        });
    }
    Ok(())
}
