use crate::apis::{reject_server_error, DirectoryBackend};
use crate::app::ports::HttpClientPort;
use crate::constants::{SEARCH_PAGE_BACKEND, VCARD_LINK_MARKER};
use crate::error::Result;
use crate::parser::{RecordParser, VcardParser};
use crate::types::{Field, Hit, RawRecord};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, instrument};
use url::{form_urlencoded, Url};

const SEARCH_FIELDS: &[Field] = &[Field::Id, Field::Name, Field::Email];

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector parses"));

/// Searches the web directory and follows the first contact-card link on the results page.
pub struct SearchPageBackend {
    http: Arc<dyn HttpClientPort>,
    search_url: String,
    parser: VcardParser,
}

impl SearchPageBackend {
    pub fn new(http: Arc<dyn HttpClientPort>, search_url: impl Into<String>) -> Self {
        Self {
            http,
            search_url: search_url.into(),
            parser: VcardParser::without_title(),
        }
    }

    /// Keyword search, "starts with" matching, all categories checked
    pub fn search_url_for(&self, query: &str) -> String {
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("form_type", "basic_search")
            .append_pair("basic_keywords", query)
            .append_pair("modifier", "Starts With")
            .append_pair("basic_submit", "Search")
            .append_pair("checkbox_employees", "Employees")
            .append_pair("checkbox_students", "Students")
            .append_pair("checkbox_departments", "Departments")
            .finish();
        format!("{}?{}", self.search_url, params)
    }

    /// First anchor whose href carries the contact-card marker, resolved against `page_url`.
    pub fn find_vcard_link(html: &str, page_url: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let href = document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| href.contains(VCARD_LINK_MARKER))?;

        match Url::parse(page_url).and_then(|base| base.join(href)) {
            Ok(url) => Some(url.to_string()),
            Err(_) => Some(href.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl DirectoryBackend for SearchPageBackend {
    fn name(&self) -> &'static str {
        SEARCH_PAGE_BACKEND
    }

    fn fields(&self) -> &'static [Field] {
        SEARCH_FIELDS
    }

    #[instrument(skip(self))]
    async fn lookup_one(&self, query: &str) -> Result<Option<Hit>> {
        let search_url = self.search_url_for(query);
        let page = self.http.get(&search_url).await?;
        reject_server_error(&page, &search_url)?;

        let Some(card_url) = Self::find_vcard_link(&page.body, &page.final_url) else {
            debug!("No contact-card link on results page");
            return Ok(None);
        };

        let card = self.http.get(&card_url).await?;
        reject_server_error(&card, &card_url)?;

        Ok(self.parser.parse(&card.body).map(|mut person| {
            person.id = query.to_string();
            Hit {
                person,
                raw: RawRecord::Card(card.body),
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::HttpGetResult;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MockHttp {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl HttpClientPort for MockHttp {
        async fn get(&self, url: &str) -> Result<HttpGetResult> {
            let (status, body) = match self.pages.get(url) {
                Some(body) => (200, body.clone()),
                None => (404, "<html>missing</html>".to_string()),
            };
            Ok(HttpGetResult {
                status,
                body,
                final_url: url.to_string(),
            })
        }
    }

    const SEARCH: &str = "https://directory.example.edu/index.php";

    #[test]
    fn test_search_url_encodes_keywords() {
        let backend = SearchPageBackend::new(
            Arc::new(MockHttp { pages: HashMap::new() }),
            SEARCH,
        );
        let url = backend.search_url_for("Doe, Jane");
        assert!(url.starts_with("https://directory.example.edu/index.php?"));
        assert!(url.contains("basic_keywords=Doe%2C+Jane"));
        assert!(url.contains("modifier=Starts+With"));
        assert!(url.contains("checkbox_students=Students"));
    }

    #[test]
    fn test_find_vcard_link_resolves_relative_href() {
        let html = r#"<html><body>
            <a href="/people/jdoe">Jane Doe</a>
            <a href="/people/jdoe/vcard">Download vCard</a>
        </body></html>"#;
        let link = SearchPageBackend::find_vcard_link(html, "https://directory.example.edu/index.php?q=x");
        assert_eq!(link.as_deref(), Some("https://directory.example.edu/people/jdoe/vcard"));
    }

    #[test]
    fn test_find_vcard_link_none_without_marker() {
        let html = r#"<a href="/people/jdoe">Jane Doe</a>"#;
        assert!(SearchPageBackend::find_vcard_link(html, SEARCH).is_none());
    }

    #[tokio::test]
    async fn test_lookup_follows_card_link() {
        let unwired = SearchPageBackend::new(
            Arc::new(MockHttp { pages: HashMap::new() }),
            SEARCH,
        );
        let search_url = unwired.search_url_for("jdoe");

        let pages = HashMap::from([
            (
                search_url,
                r#"<a href="https://directory.example.edu/vcard.php?id=1">card</a>"#.to_string(),
            ),
            (
                "https://directory.example.edu/vcard.php?id=1".to_string(),
                "BEGIN:VCARD\nFN:Jane Doe\nEMAIL:jdoe@example.edu\nTITLE:Staff\nEND:VCARD\n".to_string(),
            ),
        ]);
        let backend = SearchPageBackend::new(Arc::new(MockHttp { pages }), SEARCH);

        let hit = backend.lookup_one("jdoe").await.unwrap().unwrap();
        assert_eq!(hit.person.id, "jdoe");
        assert_eq!(hit.person.name, "Jane Doe");
        assert_eq!(hit.person.email, "jdoe@example.edu");
        assert_eq!(hit.person.major, "");
        assert!(matches!(hit.raw, RawRecord::Card(_)));
    }

    #[test]
    fn test_fields_include_identifier() {
        let backend = SearchPageBackend::new(
            Arc::new(MockHttp { pages: HashMap::new() }),
            SEARCH,
        );
        assert_eq!(backend.fields(), &[Field::Id, Field::Name, Field::Email]);
    }

    #[tokio::test]
    async fn test_lookup_without_results_is_none() {
        let backend = SearchPageBackend::new(
            Arc::new(MockHttp { pages: HashMap::new() }),
            SEARCH,
        );
        assert!(backend.lookup_one("nobody").await.unwrap().is_none());
    }
}
