use crate::apis::DirectoryBackend;
use crate::app::ports::HttpClientPort;
use crate::constants::{VCARD_DIRECT_BACKEND, VCARD_HEADER};
use crate::error::Result;
use crate::parser::{RecordParser, VcardParser};
use crate::query::url_encode;
use crate::types::{Field, Hit, RawRecord};
use std::sync::Arc;
use tracing::{debug, instrument};

const VCARD_FIELDS: &[Field] = &[Field::Id, Field::Name, Field::Email, Field::Major];

/// Fetches the contact card from a URL derived from the identifier; no search step.
pub struct VcardDirectBackend {
    http: Arc<dyn HttpClientPort>,
    url_template: String,
    parser: VcardParser,
}

impl VcardDirectBackend {
    pub fn new(http: Arc<dyn HttpClientPort>, url_template: impl Into<String>) -> Self {
        Self {
            http,
            url_template: url_template.into(),
            parser: VcardParser::new(),
        }
    }

    pub fn card_url(&self, id: &str) -> String {
        self.url_template.replace("{id}", &url_encode(id))
    }

    /// A card body must open with the header's first character; error pages do not.
    fn looks_like_card(body: &str) -> bool {
        let first = body.trim_start_matches('\u{feff}').chars().next();
        first.is_some() && first == VCARD_HEADER.chars().next()
    }
}

#[async_trait::async_trait]
impl DirectoryBackend for VcardDirectBackend {
    fn name(&self) -> &'static str {
        VCARD_DIRECT_BACKEND
    }

    fn fields(&self) -> &'static [Field] {
        VCARD_FIELDS
    }

    fn major_label(&self) -> &'static str {
        "titles"
    }

    #[instrument(skip(self))]
    async fn lookup_one(&self, query: &str) -> Result<Option<Hit>> {
        let url = self.card_url(query);
        let resp = self.http.get(&url).await?;

        // Error pages may still echo a card body; only a successful response counts
        if !(200..300).contains(&resp.status) {
            debug!(status = resp.status, %url, "Card request not successful");
            return Ok(None);
        }

        if !Self::looks_like_card(&resp.body) {
            debug!(status = resp.status, "Response is not a contact card");
            return Ok(None);
        }

        Ok(self.parser.parse(&resp.body).map(|mut person| {
            person.id = query.to_string();
            Hit {
                person,
                raw: RawRecord::Card(resp.body),
            }
        }))
    }
}
