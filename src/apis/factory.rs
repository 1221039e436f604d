use crate::apis::{DirectoryBackend, LdapBackend, SearchPageBackend, VcardDirectBackend};
use crate::config::Config;
use crate::constants::{LDAP_BACKEND, SEARCH_PAGE_BACKEND, VCARD_DIRECT_BACKEND};
use crate::error::Result;
use crate::infra::{LdapDirectory, ReqwestHttp};
use clap::ValueEnum;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Directory protocol server
    Ldap,
    /// Web directory search page, following its contact-card link
    Search,
    /// Contact card fetched straight from the per-identifier URL
    Vcard,
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Ldap => LDAP_BACKEND,
            BackendKind::Search => SEARCH_PAGE_BACKEND,
            BackendKind::Vcard => VCARD_DIRECT_BACKEND,
        }
    }
}

/// Wire a backend to its real transport using the loaded configuration
pub fn create_backend(kind: BackendKind, config: &Config) -> Result<Box<dyn DirectoryBackend>> {
    let timeout = config.lookup.timeout();
    let backend: Box<dyn DirectoryBackend> = match kind {
        BackendKind::Ldap => Box::new(LdapBackend::new(Box::new(LdapDirectory::new(
            config.ldap.url.clone(),
            config.ldap.base_dn.clone(),
            timeout,
        )))),
        BackendKind::Search => Box::new(SearchPageBackend::new(
            Arc::new(ReqwestHttp::new(timeout)?),
            config.web.search_url.clone(),
        )),
        BackendKind::Vcard => Box::new(VcardDirectBackend::new(
            Arc::new(ReqwestHttp::new(timeout)?),
            config.web.vcard_url_template.clone(),
        )),
    };
    Ok(backend)
}
