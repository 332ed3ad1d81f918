//! Process-wide immutable server configuration.
//!
//! Built once at startup and shared by reference; the capability and
//! session descriptors served by `capabilities/get` and `session/get` are
//! assembled from these fields instead of being reconstructed per request.

use std::net::SocketAddr;

use indexmap::IndexMap;

use crate::types::capabilities::{
    Account, AccountCapabilities, CapabilitiesResult, CapabilitySet, SessionResult,
};

/// Immutable server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Origin allowed to make cross-origin requests.
    pub cors_origin: String,
    /// The single account all calls resolve against.
    pub account_id: String,
    /// Display name for the account.
    pub account_name: String,
    /// Username reported in the session descriptor.
    pub username: String,
    /// Base URL advertised for the API and auxiliary endpoints.
    pub base_url: String,
    /// Capability limits keyed by urn.
    pub capabilities: CapabilitySet,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_origin: "http://localhost:3000".to_string(),
            account_id: "primary".to_string(),
            account_name: "Primary Account".to_string(),
            username: "user@example.com".to_string(),
            base_url: "http://localhost:8080".to_string(),
            capabilities: CapabilitySet::default(),
        }
    }
}

impl ServerConfig {
    /// The static capability descriptor served by `capabilities/get`.
    pub fn capabilities(&self) -> CapabilitiesResult {
        CapabilitiesResult {
            capabilities: self.capabilities.clone(),
        }
    }

    /// The static session descriptor served by `session/get`.
    pub fn session(&self) -> SessionResult {
        let mut accounts = IndexMap::new();
        accounts.insert(
            self.account_id.clone(),
            Account {
                name: self.account_name.clone(),
                is_personal: true,
                account_capabilities: AccountCapabilities {
                    task: self.capabilities.task.clone(),
                },
            },
        );
        SessionResult {
            capabilities: self.capabilities.clone(),
            accounts,
            username: self.username.clone(),
            api_url: format!("{}/jmap", self.base_url),
            download_url: format!("{}/download", self.base_url),
            upload_url: format!("{}/upload", self.base_url),
            event_source_url: format!("{}/eventsource", self.base_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_descriptor_contains_the_primary_account() {
        let config = ServerConfig::default();
        let session = config.session();
        assert_eq!(session.username, "user@example.com");
        assert_eq!(session.api_url, "http://localhost:8080/jmap");
        let account = session.accounts.get("primary").expect("primary account");
        assert!(account.is_personal);
        assert_eq!(account.name, "Primary Account");
    }

    #[test]
    fn capabilities_descriptor_round_trips_config() {
        let config = ServerConfig::default();
        let wire = serde_json::to_value(config.capabilities()).unwrap();
        assert_eq!(
            wire["capabilities"]["urn:ietf:params:jmap:core"]["maxSizeRequest"],
            10_000_000
        );
    }
}
