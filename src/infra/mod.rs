pub mod http_client;
pub mod ldap_client;

pub use http_client::ReqwestHttp;
pub use ldap_client::LdapDirectory;
