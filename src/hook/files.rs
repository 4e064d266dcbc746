//! Sensitive file read guard
//!
//! Denies reads of secret-bearing paths before their content enters the
//! agent's context.

use async_trait::async_trait;
use eyre::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use super::payload::HookPayload;
use super::response::{HookResponse, ReadPermissionResponse};
use super::HookHandler;

static SECRET_PATHS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(^|/)\.env(\.[A-Za-z0-9_.-]+)?$").unwrap(),
        Regex::new(r"\.ssh/(id_[a-z0-9]+|authorized_keys)$").unwrap(),
        Regex::new(r"\.aws/credentials$").unwrap(),
        Regex::new(r"(^|/)\.netrc$").unwrap(),
        Regex::new(r"(^|/)secrets?\.(ya?ml|json|toml)$").unwrap(),
        Regex::new(r"\.(pem|p12|pfx)$").unwrap(),
    ]
});

/// Guards beforeReadFile against secret-bearing paths
pub struct ReadGuard;

impl ReadGuard {
    pub fn new() -> Self {
        Self
    }

    fn is_sensitive(path: &str) -> bool {
        SECRET_PATHS.iter().any(|regex| regex.is_match(path))
    }
}

impl Default for ReadGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HookHandler for ReadGuard {
    async fn handle(&self, payload: &HookPayload) -> Result<Option<HookResponse>> {
        let response = match payload {
            HookPayload::ReadFile(p) if Self::is_sensitive(&p.file_path) => {
                log::warn!("Denied read of sensitive path: {}", p.file_path);
                ReadPermissionResponse::deny()
            }
            _ => ReadPermissionResponse::allow(),
        };

        Ok(Some(response.into()))
    }
}
