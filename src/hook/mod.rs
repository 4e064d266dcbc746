//! Hook event handling
//!
//! Hooks are short-lived processes the coding agent spawns at defined
//! extension points. This module defines the closed event taxonomy, the
//! shapes bound to each event, and the handler contract used to dispatch
//! decoded payloads.

#![allow(dead_code)] // Contract surface consumed by hook scripts, not all of it by this binary

use async_trait::async_trait;
use eyre::Result;
use serde::{Deserialize, Serialize};

pub mod audit;
pub mod dispatch;
pub mod files;
pub mod guard;
pub mod payload;
pub mod response;
pub mod screen;

use payload::HookPayload;
use response::HookResponse;

/// Hook event types fired by the agent loop
///
/// The set is closed: adding an event is a breaking schema change. Wire
/// names are the values the `hook_event_name` payload field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum HookEvent {
    /// Before the agent runs a shell command
    #[serde(rename = "beforeShellExecution")]
    BeforeShellExecution,
    /// Before the agent invokes an MCP tool
    #[serde(rename = "beforeMCPExecution")]
    BeforeMcpExecution,
    /// After the agent edited a file
    #[serde(rename = "afterFileEdit")]
    AfterFileEdit,
    /// Before the agent reads a file into context
    #[serde(rename = "beforeReadFile")]
    BeforeReadFile,
    /// Before a user prompt is submitted to the loop
    #[serde(rename = "beforeSubmitPrompt")]
    BeforeSubmitPrompt,
    /// The loop terminated
    #[serde(rename = "stop")]
    Stop,
}

/// Whether an event expects a decision back or is fire-and-forget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The host consumes the response to alter its behavior
    Request,
    /// No response object is produced
    Notification,
}

/// The response shape bound to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// `{permission: allow|deny|ask, userMessage?, agentMessage?}`
    Permission,
    /// `{permission: allow|deny}`
    ReadPermission,
    /// `{continue: bool}`
    Continue,
    /// No response object
    None,
}

impl HookEvent {
    /// All events, in taxonomy order
    pub const ALL: [HookEvent; 6] = [
        HookEvent::BeforeShellExecution,
        HookEvent::BeforeMcpExecution,
        HookEvent::AfterFileEdit,
        HookEvent::BeforeReadFile,
        HookEvent::BeforeSubmitPrompt,
        HookEvent::Stop,
    ];

    /// The wire name carried in the `hook_event_name` field
    pub fn wire_name(&self) -> &'static str {
        match self {
            HookEvent::BeforeShellExecution => "beforeShellExecution",
            HookEvent::BeforeMcpExecution => "beforeMCPExecution",
            HookEvent::AfterFileEdit => "afterFileEdit",
            HookEvent::BeforeReadFile => "beforeReadFile",
            HookEvent::BeforeSubmitPrompt => "beforeSubmitPrompt",
            HookEvent::Stop => "stop",
        }
    }

    /// Exact wire-name lookup
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.wire_name() == s)
    }

    /// Forgiving lookup for CLI input (accepts "before-shell-execution",
    /// "beforeShellExecution", "before_shell_execution", ...)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "beforeshellexecution" => Some(Self::BeforeShellExecution),
            "beforemcpexecution" => Some(Self::BeforeMcpExecution),
            "afterfileedit" => Some(Self::AfterFileEdit),
            "beforereadfile" => Some(Self::BeforeReadFile),
            "beforesubmitprompt" => Some(Self::BeforeSubmitPrompt),
            "stop" => Some(Self::Stop),
            _ => None,
        }
    }

    /// Request events expect a response the host acts on
    pub fn kind(&self) -> EventKind {
        match self {
            HookEvent::AfterFileEdit | HookEvent::Stop => EventKind::Notification,
            _ => EventKind::Request,
        }
    }

    pub fn is_request(&self) -> bool {
        self.kind() == EventKind::Request
    }

    pub fn is_notification(&self) -> bool {
        self.kind() == EventKind::Notification
    }

    /// The response shape a handler for this event must produce
    pub fn response_kind(&self) -> ResponseKind {
        match self {
            HookEvent::BeforeShellExecution | HookEvent::BeforeMcpExecution => ResponseKind::Permission,
            HookEvent::BeforeReadFile => ResponseKind::ReadPermission,
            HookEvent::BeforeSubmitPrompt => ResponseKind::Continue,
            HookEvent::AfterFileEdit | HookEvent::Stop => ResponseKind::None,
        }
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A hook handler
///
/// At most one handler is bound to an event per process invocation. A
/// handler may suspend on I/O; the dispatcher awaits it on the single
/// logical task of the invocation. Returning `None` is the "no response"
/// sentinel notification events use.
#[async_trait]
pub trait HookHandler: Send + Sync {
    async fn handle(&self, payload: &HookPayload) -> Result<Option<HookResponse>>;
}
