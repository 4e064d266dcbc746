//! Audit record emitter with multiple sink support

use chrono::{Local, Utc};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::config::{AuditConfig, AuditSink};
use crate::hook::payload::HookPayload;

/// One audited hook invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Timestamp (UTC ISO 8601)
    pub timestamp: String,
    /// Local time for display
    pub local_time: String,
    /// Wire name of the event
    pub event: String,
    /// Conversation the payload belongs to
    pub conversation_id: String,
    /// Event-specific one-line detail (command, file path, status, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Full payload (optional, can be large)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl AuditRecord {
    /// Create a record from a dispatched payload
    pub fn from_payload(payload: &HookPayload, include_payload: bool) -> Self {
        let now = Utc::now();
        let local = Local::now();

        let detail = match payload {
            HookPayload::ShellExecution(p) => Some(p.command.clone()),
            HookPayload::McpExecution(p) => Some(p.tool_name.clone()),
            HookPayload::FileEdit(p) => Some(format!("{} ({} edits)", p.file_path, p.edits.len())),
            HookPayload::ReadFile(p) => Some(p.file_path.clone()),
            HookPayload::SubmitPrompt(p) => Some(truncate(&p.prompt, 80)),
            HookPayload::Stop(p) => Some(p.status.as_str().to_string()),
        };

        Self {
            timestamp: now.to_rfc3339(),
            local_time: local.format("%Y-%m-%d %H:%M:%S").to_string(),
            event: payload.event().wire_name().to_string(),
            conversation_id: payload.common().conversation_id.clone(),
            detail,
            payload: if include_payload {
                serde_json::to_value(payload).ok()
            } else {
                None
            },
        }
    }

    /// Format for terminal display
    pub fn format_display(&self) -> String {
        let event_colored = match self.event.as_str() {
            "beforeShellExecution" => self.event.cyan(),
            "beforeMCPExecution" => self.event.blue(),
            "afterFileEdit" => self.event.green(),
            "beforeReadFile" => self.event.magenta(),
            "beforeSubmitPrompt" => self.event.normal(),
            "stop" => self.event.yellow(),
            _ => self.event.normal(),
        };

        let mut parts = vec![self.local_time.dimmed().to_string(), event_colored.to_string()];

        let conversation = &self.conversation_id;
        parts.push(
            format!("[{}]", &conversation[..8.min(conversation.len())])
                .dimmed()
                .to_string(),
        );

        if let Some(ref detail) = self.detail {
            parts.push(detail.bold().to_string());
        }

        parts.join(" ")
    }
}

fn truncate(s: &str, max: usize) -> String {
    let line = s.lines().next().unwrap_or(s);
    if line.len() > max {
        format!("{}...", &line[..max.saturating_sub(3)])
    } else {
        line.to_string()
    }
}

/// Audit emitter that sends records to multiple sinks
pub struct AuditEmitter {
    config: AuditConfig,
}

impl AuditEmitter {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Emit a record for a payload to all configured sinks
    pub fn emit(&self, payload: &HookPayload) {
        if !self.config.enabled {
            return;
        }

        let record = AuditRecord::from_payload(payload, self.config.include_payload);

        for sink in &self.config.sinks {
            match sink {
                AuditSink::File => {
                    if let Err(e) = self.emit_to_file(&record) {
                        log::warn!("Failed to emit to file sink: {}", e);
                    }
                }
                AuditSink::Stderr => {
                    eprintln!("{}", record.format_display());
                }
                AuditSink::Http => {
                    if let Err(e) = self.emit_to_http(&record) {
                        log::warn!("Failed to emit to HTTP sink: {}", e);
                    }
                }
            }
        }
    }

    /// Write a record to a month-partitioned JSONL file
    fn emit_to_file(&self, record: &AuditRecord) -> std::io::Result<()> {
        let now = Local::now();
        let month_dir = self.record_dir().join(now.format("%Y-%m").to_string());
        fs::create_dir_all(&month_dir)?;

        let log_file = month_dir.join(format!("{}.jsonl", now.format("%Y-%m-%d")));

        let mut file = OpenOptions::new().create(true).append(true).open(log_file)?;

        let json = serde_json::to_string(record).unwrap_or_default();
        writeln!(file, "{}", json)?;

        Ok(())
    }

    /// POST a record to the configured HTTP endpoint
    fn emit_to_http(&self, record: &AuditRecord) -> Result<(), String> {
        let endpoint = self
            .config
            .http_endpoint
            .as_ref()
            .ok_or_else(|| "HTTP endpoint not configured".to_string())?;

        let body = serde_json::to_string(record).map_err(|e| e.to_string())?;

        match ureq::post(endpoint)
            .header("Content-Type", "application/json")
            .send(body.as_bytes())
        {
            Ok(_) => Ok(()),
            Err(e) => Err(format!("HTTP request failed: {}", e)),
        }
    }

    fn record_dir(&self) -> PathBuf {
        crate::config::Config::expand_path(&self.config.path).join("records")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::payload::{CommonFields, FileEdit, FileEditPayload, LoopStatus, StopPayload};
    use crate::hook::HookEvent;

    fn file_edit_payload() -> HookPayload {
        HookPayload::FileEdit(FileEditPayload {
            common: CommonFields {
                conversation_id: "conv-1234".into(),
                generation_id: "gen-1".into(),
                hook_event_name: HookEvent::AfterFileEdit,
                workspace_roots: vec!["/proj".into()],
            },
            file_path: "/proj/src/lib.rs".into(),
            edits: vec![FileEdit {
                old_string: "foo".into(),
                new_string: "bar".into(),
            }],
        })
    }

    #[test]
    fn test_record_from_payload() {
        let record = AuditRecord::from_payload(&file_edit_payload(), false);
        assert_eq!(record.event, "afterFileEdit");
        assert_eq!(record.conversation_id, "conv-1234");
        assert_eq!(record.detail.as_deref(), Some("/proj/src/lib.rs (1 edits)"));
        assert!(record.payload.is_none());
    }

    #[test]
    fn test_record_with_payload() {
        let record = AuditRecord::from_payload(&file_edit_payload(), true);
        assert!(record.payload.is_some());
    }

    #[test]
    fn test_stop_record_detail_is_status() {
        let payload = HookPayload::Stop(StopPayload {
            common: CommonFields {
                conversation_id: "conv-1234".into(),
                generation_id: "gen-1".into(),
                hook_event_name: HookEvent::Stop,
                workspace_roots: vec![],
            },
            status: LoopStatus::Aborted,
        });
        let record = AuditRecord::from_payload(&payload, false);
        assert_eq!(record.detail.as_deref(), Some("aborted"));
    }

    #[test]
    fn test_format_display() {
        let record = AuditRecord {
            timestamp: "2026-01-03T12:00:00Z".to_string(),
            local_time: "2026-01-03 12:00:00".to_string(),
            event: "stop".to_string(),
            conversation_id: "abc12345".to_string(),
            detail: Some("completed".to_string()),
            payload: None,
        };

        let display = record.format_display();
        assert!(display.contains("2026-01-03 12:00:00"));
        assert!(display.contains("abc12345"));
        assert!(display.contains("completed"));
    }

    #[test]
    fn test_emitter_disabled() {
        let config = AuditConfig {
            enabled: false,
            sinks: vec![AuditSink::Stderr],
            http_endpoint: None,
            include_payload: false,
            path: PathBuf::from("/tmp"),
        };

        let emitter = AuditEmitter::new(config);
        // Should not panic or do anything
        emitter.emit(&file_edit_payload());
    }

    #[test]
    fn test_file_sink_writes_jsonl() {
        let temp = tempfile::tempdir().unwrap();
        let config = AuditConfig {
            enabled: true,
            sinks: vec![AuditSink::File],
            http_endpoint: None,
            include_payload: false,
            path: temp.path().to_path_buf(),
        };

        let emitter = AuditEmitter::new(config);
        emitter.emit(&file_edit_payload());

        let records_dir = temp.path().join("records");
        let month_dir = fs::read_dir(&records_dir).unwrap().next().unwrap().unwrap().path();
        let day_file = fs::read_dir(&month_dir).unwrap().next().unwrap().unwrap().path();
        let content = fs::read_to_string(day_file).unwrap();
        let record: AuditRecord = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(record.event, "afterFileEdit");
    }
}
