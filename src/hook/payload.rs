//! Typed hook payloads
//!
//! One struct per event, sharing the common fields every payload carries.
//! `HookPayload` is the decoder at the trust boundary: it peeks the
//! `hook_event_name` discriminant and decodes the matching variant. Unknown
//! extra fields are tolerated; missing required fields fail the decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::HookEvent;

/// Fields present on every payload regardless of event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonFields {
    /// Opaque identifier grouping one interactive session
    pub conversation_id: String,

    /// Opaque identifier grouping one loop iteration
    pub generation_id: String,

    /// The discriminant; must equal the event this payload represents
    pub hook_event_name: HookEvent,

    /// Workspace root paths (non-empty in practice, not enforced here)
    #[serde(default)]
    pub workspace_roots: Vec<String>,
}

/// beforeShellExecution payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellExecutionPayload {
    #[serde(flatten)]
    pub common: CommonFields,

    /// The command line about to run
    pub command: String,

    /// Working directory for the command
    pub cwd: String,
}

/// beforeMCPExecution payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpExecutionPayload {
    #[serde(flatten)]
    pub common: CommonFields,

    /// The tool being invoked
    pub tool_name: String,

    /// Tool input parameters, as supplied by the agent
    pub tool_input: Value,

    /// Server URL for remote MCP servers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Launch command for stdio MCP servers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

/// afterFileEdit payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEditPayload {
    #[serde(flatten)]
    pub common: CommonFields,

    /// The file that was edited
    pub file_path: String,

    /// Individual edits applied to the file
    pub edits: Vec<FileEdit>,
}

/// A single edit within a file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEdit {
    pub old_string: String,
    pub new_string: String,
}

/// beforeReadFile payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadFilePayload {
    #[serde(flatten)]
    pub common: CommonFields,

    /// The file about to be read
    pub file_path: String,

    /// The content that would enter the agent's context
    pub content: String,

    /// Files attached alongside the read
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// An attached file reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub r#type: String,
    pub file_path: String,
}

/// beforeSubmitPrompt payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPromptPayload {
    #[serde(flatten)]
    pub common: CommonFields,

    /// The prompt text the user is submitting
    pub prompt: String,

    /// Files attached to the prompt
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// stop payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopPayload {
    #[serde(flatten)]
    pub common: CommonFields,

    /// How the loop ended
    pub status: LoopStatus,
}

/// Terminal status of the agent loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopStatus {
    Completed,
    Aborted,
    Error,
}

impl LoopStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopStatus::Completed => "completed",
            LoopStatus::Aborted => "aborted",
            LoopStatus::Error => "error",
        }
    }
}

/// Enum wrapper over all payloads, enabling type-safe dispatch
///
/// Serializes back to the flat wire object (each variant carries its own
/// discriminant in `common`), so decode/encode round-trips.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum HookPayload {
    ShellExecution(ShellExecutionPayload),
    McpExecution(McpExecutionPayload),
    FileEdit(FileEditPayload),
    ReadFile(ReadFilePayload),
    SubmitPrompt(SubmitPromptPayload),
    Stop(StopPayload),
}

impl<'de> Deserialize<'de> for HookPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        // Peek at the discriminant before committing to a variant
        let value = Value::deserialize(deserializer)?;

        let name = value
            .get("hook_event_name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| D::Error::missing_field("hook_event_name"))?;

        let event = HookEvent::from_wire(name).ok_or_else(|| {
            D::Error::unknown_variant(
                name,
                &[
                    "beforeShellExecution",
                    "beforeMCPExecution",
                    "afterFileEdit",
                    "beforeReadFile",
                    "beforeSubmitPrompt",
                    "stop",
                ],
            )
        })?;

        match event {
            HookEvent::BeforeShellExecution => serde_json::from_value(value)
                .map(HookPayload::ShellExecution)
                .map_err(D::Error::custom),
            HookEvent::BeforeMcpExecution => serde_json::from_value(value)
                .map(HookPayload::McpExecution)
                .map_err(D::Error::custom),
            HookEvent::AfterFileEdit => serde_json::from_value(value)
                .map(HookPayload::FileEdit)
                .map_err(D::Error::custom),
            HookEvent::BeforeReadFile => serde_json::from_value(value)
                .map(HookPayload::ReadFile)
                .map_err(D::Error::custom),
            HookEvent::BeforeSubmitPrompt => serde_json::from_value(value)
                .map(HookPayload::SubmitPrompt)
                .map_err(D::Error::custom),
            HookEvent::Stop => serde_json::from_value(value)
                .map(HookPayload::Stop)
                .map_err(D::Error::custom),
        }
    }
}

impl HookPayload {
    /// Decode from an already-parsed JSON value
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// The event this payload represents
    pub fn event(&self) -> HookEvent {
        match self {
            HookPayload::ShellExecution(_) => HookEvent::BeforeShellExecution,
            HookPayload::McpExecution(_) => HookEvent::BeforeMcpExecution,
            HookPayload::FileEdit(_) => HookEvent::AfterFileEdit,
            HookPayload::ReadFile(_) => HookEvent::BeforeReadFile,
            HookPayload::SubmitPrompt(_) => HookEvent::BeforeSubmitPrompt,
            HookPayload::Stop(_) => HookEvent::Stop,
        }
    }

    /// The common fields every payload carries
    pub fn common(&self) -> &CommonFields {
        match self {
            HookPayload::ShellExecution(p) => &p.common,
            HookPayload::McpExecution(p) => &p.common,
            HookPayload::FileEdit(p) => &p.common,
            HookPayload::ReadFile(p) => &p.common,
            HookPayload::SubmitPrompt(p) => &p.common,
            HookPayload::Stop(p) => &p.common,
        }
    }
}
