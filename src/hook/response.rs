//! Hook response shapes
//!
//! Request-style events get a decision object back; notifications produce
//! nothing. Optional message fields are omitted from the wire when unset so
//! "no message supplied" stays distinguishable from an empty message.

use serde::{Deserialize, Serialize};

/// Decision attached to execution-request responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionDecision {
    Allow,
    Deny,
    Ask,
}

/// Response for beforeShellExecution and beforeMCPExecution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResponse {
    pub permission: PermissionDecision,

    /// Shown to the end user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,

    /// Fed back to the agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_message: Option<String>,
}

impl PermissionResponse {
    /// Allow the action with no messages attached
    pub fn allow() -> Self {
        Self {
            permission: PermissionDecision::Allow,
            user_message: None,
            agent_message: None,
        }
    }

    /// Deny the action, telling the agent why
    pub fn deny(agent_message: impl Into<String>) -> Self {
        Self {
            permission: PermissionDecision::Deny,
            user_message: None,
            agent_message: Some(agent_message.into()),
        }
    }

    /// Defer to the user, with a message explaining what is being asked
    pub fn ask(user_message: impl Into<String>) -> Self {
        Self {
            permission: PermissionDecision::Ask,
            user_message: Some(user_message.into()),
            agent_message: None,
        }
    }

    pub fn with_user_message(mut self, message: impl Into<String>) -> Self {
        self.user_message = Some(message.into());
        self
    }

    pub fn is_deny(&self) -> bool {
        self.permission == PermissionDecision::Deny
    }
}

/// Two-valued decision for beforeReadFile (no "ask" escape hatch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadDecision {
    Allow,
    Deny,
}

/// Response for beforeReadFile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadPermissionResponse {
    pub permission: ReadDecision,
}

impl ReadPermissionResponse {
    pub fn allow() -> Self {
        Self {
            permission: ReadDecision::Allow,
        }
    }

    pub fn deny() -> Self {
        Self {
            permission: ReadDecision::Deny,
        }
    }
}

/// Response for beforeSubmitPrompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinueResponse {
    /// true permits submission, false blocks it
    #[serde(rename = "continue")]
    pub continue_submission: bool,
}

impl ContinueResponse {
    pub fn proceed() -> Self {
        Self {
            continue_submission: true,
        }
    }

    pub fn block() -> Self {
        Self {
            continue_submission: false,
        }
    }
}

/// Any response a handler can produce
///
/// Untagged: the wire shape is the inner object itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HookResponse {
    Permission(PermissionResponse),
    ReadPermission(ReadPermissionResponse),
    Continue(ContinueResponse),
}

impl From<PermissionResponse> for HookResponse {
    fn from(response: PermissionResponse) -> Self {
        HookResponse::Permission(response)
    }
}

impl From<ReadPermissionResponse> for HookResponse {
    fn from(response: ReadPermissionResponse) -> Self {
        HookResponse::ReadPermission(response)
    }
}

impl From<ContinueResponse> for HookResponse {
    fn from(response: ContinueResponse) -> Self {
        HookResponse::Continue(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_survives_roundtrip() {
        let response = PermissionResponse::deny("blocked: catastrophic deletion");
        let json = serde_json::to_string(&response).unwrap();
        let reparsed: PermissionResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed, response);
        assert_eq!(reparsed.permission, PermissionDecision::Deny);
        assert!(reparsed.is_deny());
    }

    #[test]
    fn test_absent_messages_are_omitted() {
        let json = serde_json::to_value(PermissionResponse::allow()).unwrap();
        assert_eq!(json["permission"], "allow");
        assert!(json.get("userMessage").is_none());
        assert!(json.get("agentMessage").is_none());

        // An empty message is still present on the wire
        let json = serde_json::to_value(PermissionResponse::allow().with_user_message("")).unwrap();
        assert_eq!(json["userMessage"], "");
    }

    #[test]
    fn test_message_field_names_are_camel_case() {
        let json = serde_json::to_value(PermissionResponse::ask("run this?")).unwrap();
        assert_eq!(json["permission"], "ask");
        assert_eq!(json["userMessage"], "run this?");
    }

    #[test]
    fn test_continue_field_name() {
        let json = serde_json::to_value(ContinueResponse::proceed()).unwrap();
        assert_eq!(json["continue"], true);
        let json = serde_json::to_value(ContinueResponse::block()).unwrap();
        assert_eq!(json["continue"], false);
    }

    #[test]
    fn test_read_permission_is_two_valued() {
        let json = serde_json::to_value(ReadPermissionResponse::deny()).unwrap();
        assert_eq!(json, serde_json::json!({"permission": "deny"}));
        assert!(serde_json::from_str::<ReadDecision>("\"ask\"").is_err());
    }

    #[test]
    fn test_union_serializes_flat() {
        let response: HookResponse = PermissionResponse::deny("no").into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["permission"], "deny");
        assert!(json.get("Permission").is_none());
    }
}
