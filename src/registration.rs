//! Hook registration file parsing (hooks.json)
//!
//! The registration file tells the host which external commands to invoke
//! for each event. It is read once at host startup or configuration reload
//! and never mutated here.

#![allow(dead_code)] // Accessors reserved for host-side loading

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::hook::HookEvent;

/// The one registration file version this build understands
pub const SUPPORTED_VERSION: u64 = 1;

/// Shape violations in a registration file
///
/// Reported to the caller; the recovery policy (fail startup vs. skip the
/// file) is the host's decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("unsupported registration version {0} (expected {SUPPORTED_VERSION})")]
    UnsupportedVersion(u64),

    #[error("'{0}' is not a hook event")]
    UnknownEvent(String),

    #[error("entry {index} for event '{event}' has an empty command")]
    EmptyCommand { event: String, index: usize },
}

/// One external command bound to one event
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationEntry {
    /// Opaque command string; how it is interpreted (absolute path,
    /// relative path, shell invocation) is the host's business
    pub command: String,
}

/// The hook registration file: version marker plus event-to-commands map
///
/// Unknown top-level fields are tolerated; key and entry order from the
/// file is preserved.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HookRegistration {
    pub version: u64,

    #[serde(default)]
    pub hooks: IndexMap<String, Vec<RegistrationEntry>>,
}

impl HookRegistration {
    /// Load a registration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_str(&content)
    }

    /// Parse a registration from a JSON string
    pub fn from_str(content: &str) -> eyre::Result<Self> {
        let registration: Self = serde_json::from_str(content)?;
        Ok(registration)
    }

    /// Decode from an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Check the shape rules the host relies on
    ///
    /// Rejects an unsupported version, a hooks key outside the closed event
    /// set, and entries with an empty command.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.version != SUPPORTED_VERSION {
            return Err(RegistrationError::UnsupportedVersion(self.version));
        }

        for (key, entries) in &self.hooks {
            if HookEvent::from_wire(key).is_none() {
                return Err(RegistrationError::UnknownEvent(key.clone()));
            }

            for (index, entry) in entries.iter().enumerate() {
                if entry.command.trim().is_empty() {
                    return Err(RegistrationError::EmptyCommand {
                        event: key.clone(),
                        index,
                    });
                }
            }
        }

        Ok(())
    }

    /// Commands registered for an event, in file order
    ///
    /// An absent key and an empty list both mean "no hook registered".
    pub fn entries_for(&self, event: HookEvent) -> &[RegistrationEntry] {
        self.hooks
            .get(event.wire_name())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any event has at least one command registered
    pub fn has_hooks(&self) -> bool {
        self.hooks.values().any(|entries| !entries.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_REGISTRATION: &str = r#"{"version": 1, "hooks": {}}"#;

    const FULL_REGISTRATION: &str = r#"{
        "version": 1,
        "hooks": {
            "beforeShellExecution": [
                {"command": "./hooks/screen.sh"},
                {"command": "hookgate hook dispatch before-shell-execution"}
            ],
            "afterFileEdit": [
                {"command": "./hooks/format.sh"}
            ],
            "stop": [
                {"command": "./hooks/capture.sh"}
            ]
        }
    }"#;

    #[test]
    fn test_parse_minimal_registration() {
        let registration = HookRegistration::from_str(MINIMAL_REGISTRATION).unwrap();
        assert_eq!(registration.version, 1);
        assert!(registration.hooks.is_empty());
        assert!(!registration.has_hooks());
        assert!(registration.validate().is_ok());
    }

    #[test]
    fn test_parse_full_registration() {
        let registration = HookRegistration::from_str(FULL_REGISTRATION).unwrap();
        assert!(registration.validate().is_ok());
        assert!(registration.has_hooks());

        let entries = registration.entries_for(HookEvent::BeforeShellExecution);
        assert_eq!(entries.len(), 2);
        // File order is preserved
        assert_eq!(entries[0].command, "./hooks/screen.sh");
        assert_eq!(registration.entries_for(HookEvent::Stop).len(), 1);
    }

    #[test]
    fn test_absent_event_means_no_hooks() {
        let registration = HookRegistration::from_str(FULL_REGISTRATION).unwrap();
        assert!(registration.entries_for(HookEvent::BeforeReadFile).is_empty());
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let registration = HookRegistration::from_str(r#"{"version": 2, "hooks": {}}"#).unwrap();
        assert_eq!(
            registration.validate(),
            Err(RegistrationError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn test_rejects_unknown_event_key() {
        let registration = HookRegistration::from_str(
            r#"{"version": 1, "hooks": {"beforeReadFile": [{"command": "./x.sh"}], "notAnEvent": []}}"#,
        )
        .unwrap();
        assert_eq!(
            registration.validate(),
            Err(RegistrationError::UnknownEvent("notAnEvent".to_string()))
        );
    }

    #[test]
    fn test_rejects_empty_command() {
        let registration =
            HookRegistration::from_str(r#"{"version": 1, "hooks": {"stop": [{"command": "  "}]}}"#).unwrap();
        assert_eq!(
            registration.validate(),
            Err(RegistrationError::EmptyCommand {
                event: "stop".to_string(),
                index: 0,
            })
        );
    }

    #[test]
    fn test_missing_command_fails_decode() {
        let result = HookRegistration::from_str(r#"{"version": 1, "hooks": {"stop": [{}]}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_integer_version_fails_decode() {
        assert!(HookRegistration::from_str(r#"{"version": "1", "hooks": {}}"#).is_err());
        assert!(HookRegistration::from_str(r#"{"version": 1.5, "hooks": {}}"#).is_err());
    }

    #[test]
    fn test_unknown_top_level_fields_are_tolerated() {
        let registration =
            HookRegistration::from_str(r#"{"version": 1, "hooks": {}, "comment": "managed by CI"}"#).unwrap();
        assert!(registration.validate().is_ok());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let registration = HookRegistration::from_str(FULL_REGISTRATION).unwrap();
        let json = serde_json::to_string(&registration).unwrap();
        let reparsed = HookRegistration::from_str(&json).unwrap();
        assert_eq!(reparsed.version, registration.version);
        assert_eq!(
            reparsed.entries_for(HookEvent::BeforeShellExecution).len(),
            registration.entries_for(HookEvent::BeforeShellExecution).len()
        );
    }
}
