use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LDAP operation failed: {0}")]
    Ldap(#[from] ldap3::LdapError),

    #[error("LDAP operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected response status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Backend '{0}' does not support batch queries")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, LookupError>;
