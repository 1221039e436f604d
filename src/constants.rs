/// Backend names as accepted on the command line and shown in logs
pub const LDAP_BACKEND: &str = "ldap";
pub const SEARCH_PAGE_BACKEND: &str = "search";
pub const VCARD_DIRECT_BACKEND: &str = "vcard";

// Directory protocol defaults
pub const DEFAULT_LDAP_URL: &str = "ldap://ldap.oit.uci.edu";
pub const DEFAULT_BASE_DN: &str = "dc=uci,dc=edu";

// Entry attribute names
pub const ATTR_UID: &str = "uid";
pub const ATTR_DISPLAY_NAME: &str = "displayName";
pub const ATTR_MAIL: &str = "mail";
pub const ATTR_MAJOR: &str = "major";
pub const ATTR_STUDENT_LEVEL: &str = "uciStudentLevel";

// Web directory defaults
pub const DEFAULT_SEARCH_URL: &str = "https://directory.uci.edu/index.php";
/// `{id}` is replaced with the URL-encoded identifier
pub const DEFAULT_VCARD_URL_TEMPLATE: &str = "https://directory.uci.edu/people/{id}/vcard";
/// Substring that marks an anchor as a contact-card download link
pub const VCARD_LINK_MARKER: &str = "vcard";
pub const VCARD_HEADER: &str = "BEGIN:VCARD";

// Contact-card keys
pub const CARD_NAME: &str = "FN";
pub const CARD_EMAIL: &str = "EMAIL";
pub const CARD_TITLE: &str = "TITLE";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Sentinel line that ends interactive multi-search input
pub const DONE_SENTINEL: &str = "done";

