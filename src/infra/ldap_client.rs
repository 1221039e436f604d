use crate::app::ports::DirectoryPort;
use crate::error::{LookupError, Result};
use crate::types::EntryAttributes;
use async_trait::async_trait;
use ldap3::{LdapConnAsync, LdapConnSettings, Scope, SearchEntry};
use std::time::Duration;
use tracing::{debug, warn};

/// Anonymous LDAP search against a fixed server and base DN.
///
/// Each search opens its own connection and unbinds afterwards.
pub struct LdapDirectory {
    url: String,
    base_dn: String,
    timeout: Duration,
}

impl LdapDirectory {
    pub fn new(url: impl Into<String>, base_dn: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            base_dn: base_dn.into(),
            timeout,
        }
    }

    async fn search_once(&self, filter: &str) -> Result<Vec<EntryAttributes>> {
        let settings = LdapConnSettings::new().set_conn_timeout(self.timeout);
        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &self.url).await?;
        ldap3::drive!(conn);

        ldap.simple_bind("", "").await?.success()?;
        let (entries, _res) = ldap
            .search(&self.base_dn, Scope::Subtree, filter, vec!["*"])
            .await?
            .success()?;

        let attrs: Vec<EntryAttributes> = entries
            .into_iter()
            .map(|entry| SearchEntry::construct(entry).attrs.into_iter().collect())
            .collect();

        if let Err(e) = ldap.unbind().await {
            warn!(error = %e, "LDAP unbind failed");
        }
        Ok(attrs)
    }
}

#[async_trait]
impl DirectoryPort for LdapDirectory {
    async fn search(&self, filter: &str) -> Result<Vec<EntryAttributes>> {
        debug!(url = %self.url, base_dn = %self.base_dn, %filter, "LDAP search");
        let entries = tokio::time::timeout(self.timeout, self.search_once(filter))
            .await
            .map_err(|_| LookupError::Timeout(self.timeout.as_secs()))??;
        debug!(count = entries.len(), "LDAP search complete");
        Ok(entries)
    }
}
