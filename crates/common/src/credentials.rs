//! Credential reference seam.
//!
//! Fleetlink never stores or transmits secrets. Host protocol configs carry
//! a `cred_id` string that an external credential provider resolves at
//! collection time, keyed by (cred_id, realm). This module only defines the
//! collaborator contract; implementations live outside this workspace.

use crate::Result;

/// Resolved credential material. Only ever lives in the collaborator that
/// implements [`CredentialProvider`]; fleetlink code holds it transiently
/// at most and never serializes it.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

/// External credential provider contract.
pub trait CredentialProvider: Send + Sync {
    /// Resolve a credential reference within a realm.
    fn resolve(&self, cred_id: &str, realm: &str) -> Result<Credentials>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::collections::HashMap;

    struct MapProvider {
        entries: HashMap<(String, String), Credentials>,
    }

    impl CredentialProvider for MapProvider {
        fn resolve(&self, cred_id: &str, realm: &str) -> Result<Credentials> {
            self.entries
                .get(&(cred_id.to_string(), realm.to_string()))
                .cloned()
                .ok_or_else(|| {
                    Error::Config(format!("unknown credential {} in realm {}", cred_id, realm))
                })
        }
    }

    #[test]
    fn test_resolution_is_keyed_by_id_and_realm() {
        let mut entries = HashMap::new();
        entries.insert(
            ("sim".to_string(), "lab".to_string()),
            Credentials {
                user: "operator".to_string(),
                pass: "secret".to_string(),
            },
        );
        let provider = MapProvider { entries };

        assert_eq!(provider.resolve("sim", "lab").unwrap().user, "operator");
        assert!(provider.resolve("sim", "prod").unwrap_err().is_config());
    }
}
