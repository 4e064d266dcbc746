//! Command screening handler
//!
//! Denies dangerous commands before the agent executes them and defers
//! privilege escalation to the user.

use async_trait::async_trait;
use eyre::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use super::payload::HookPayload;
use super::response::{HookResponse, PermissionResponse};
use super::HookHandler;

/// Attack patterns to check against
struct AttackPattern {
    patterns: Vec<Regex>,
    description: &'static str,
}

static ATTACK_PATTERNS: Lazy<Vec<AttackPattern>> = Lazy::new(|| {
    vec![
        // Catastrophic - always deny
        AttackPattern {
            patterns: vec![
                Regex::new(r"rm\s+(-rf?|--recursive)\s+[/~]").unwrap(),
                Regex::new(r"rm\s+(-rf?|--recursive)\s+\*").unwrap(),
                Regex::new(r">\s*/dev/sd[a-z]").unwrap(),
                Regex::new(r"mkfs\.").unwrap(),
                Regex::new(r"dd\s+if=.*of=/dev").unwrap(),
            ],
            description: "catastrophic deletion/destruction",
        },
        // Remote code execution
        AttackPattern {
            patterns: vec![
                Regex::new(r"curl.*\|\s*(ba)?sh").unwrap(),
                Regex::new(r"wget.*\|\s*(ba)?sh").unwrap(),
                Regex::new(r"curl.*-o\s+/tmp/.*&&.*sh").unwrap(),
            ],
            description: "remote code execution",
        },
        // Credential theft
        AttackPattern {
            patterns: vec![
                Regex::new(r"cat\s+.*\.ssh/(id_|authorized)").unwrap(),
                Regex::new(r"cat\s+.*/\.aws/credentials").unwrap(),
                Regex::new(r"cat\s+.*/\.netrc").unwrap(),
                Regex::new(r"base64.*\.ssh").unwrap(),
            ],
            description: "credential access",
        },
    ]
});

// Not dangerous enough to deny outright, but the user should confirm
static ESCALATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\s*sudo\s").unwrap(),
        Regex::new(r"^\s*doas\s").unwrap(),
        Regex::new(r"chmod\s+(-R\s+)?[0-7]*7[0-7]*7").unwrap(),
    ]
});

/// Screens shell and MCP launch commands before execution
pub struct CommandScreen;

impl CommandScreen {
    pub fn new() -> Self {
        Self
    }

    fn screen(&self, command: &str) -> PermissionResponse {
        for pattern in ATTACK_PATTERNS.iter() {
            for regex in &pattern.patterns {
                if regex.is_match(command) {
                    log::warn!("Denied command ({}): {}", pattern.description, command);
                    return PermissionResponse::deny(format!("blocked: {}", pattern.description));
                }
            }
        }

        for regex in ESCALATION_PATTERNS.iter() {
            if regex.is_match(command) {
                return PermissionResponse::ask("This command escalates privileges. Run it?");
            }
        }

        PermissionResponse::allow()
    }
}

impl Default for CommandScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HookHandler for CommandScreen {
    async fn handle(&self, payload: &HookPayload) -> Result<Option<HookResponse>> {
        let response = match payload {
            HookPayload::ShellExecution(p) => self.screen(&p.command),
            // MCP servers only carry a command when launched over stdio
            HookPayload::McpExecution(p) => match p.command.as_deref() {
                Some(command) => self.screen(command),
                None => PermissionResponse::allow(),
            },
            _ => PermissionResponse::allow(),
        };

        Ok(Some(response.into()))
    }
}
