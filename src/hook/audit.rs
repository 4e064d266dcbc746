//! Audit hook handler
//!
//! Records notification events and passes prompt submissions through. The
//! two notifications produce no response; prompt submission gets an
//! affirmative continue decision.

use async_trait::async_trait;
use eyre::Result;

use crate::audit::AuditEmitter;
use crate::config::AuditConfig;

use super::payload::HookPayload;
use super::response::{ContinueResponse, HookResponse};
use super::HookHandler;

/// Captures an audit trail of lifecycle events
pub struct AuditHandler {
    emitter: AuditEmitter,
}

impl AuditHandler {
    pub fn new(config: AuditConfig) -> Self {
        Self {
            emitter: AuditEmitter::new(config),
        }
    }
}

#[async_trait]
impl HookHandler for AuditHandler {
    async fn handle(&self, payload: &HookPayload) -> Result<Option<HookResponse>> {
        self.emitter.emit(payload);

        let response = match payload {
            HookPayload::SubmitPrompt(_) => Some(ContinueResponse::proceed().into()),
            _ => None,
        };

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::payload::{CommonFields, LoopStatus, StopPayload, SubmitPromptPayload};
    use crate::hook::HookEvent;

    fn handler() -> AuditHandler {
        let temp = tempfile::tempdir().unwrap();
        AuditHandler::new(AuditConfig {
            path: temp.keep(),
            ..AuditConfig::default()
        })
    }

    fn common(event: HookEvent) -> CommonFields {
        CommonFields {
            conversation_id: "c1".into(),
            generation_id: "g1".into(),
            hook_event_name: event,
            workspace_roots: vec!["/proj".into()],
        }
    }

    #[tokio::test]
    async fn test_stop_produces_no_response() {
        let payload = HookPayload::Stop(StopPayload {
            common: common(HookEvent::Stop),
            status: LoopStatus::Completed,
        });

        let result = handler().handle(&payload).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_prompt_submission_continues() {
        let payload = HookPayload::SubmitPrompt(SubmitPromptPayload {
            common: common(HookEvent::BeforeSubmitPrompt),
            prompt: "fix the flaky test".into(),
            attachments: vec![],
        });

        let result = handler().handle(&payload).await.unwrap();
        match result {
            Some(HookResponse::Continue(r)) => assert!(r.continue_submission),
            other => panic!("expected a continue decision, got {:?}", other),
        }
    }
}
