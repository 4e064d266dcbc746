//! Hook dispatch entry point
//!
//! This is the transport boundary: one JSON payload in on stdin, at most
//! one JSON response out on stdout, exit status signalling success or
//! failure. Diagnostics go to stderr and the log file, never stdout.

use colored::*;
use eyre::{Context, Result};
use serde::Serialize;
use std::io::{self, Read};
use std::sync::Arc;

use crate::cli::{HookAction, OutputFormat};
use crate::config::Config;
use crate::hook::audit::AuditHandler;
use crate::hook::dispatch::HookDispatcher;
use crate::hook::files::ReadGuard;
use crate::hook::guard;
use crate::hook::payload::HookPayload;
use crate::hook::screen::CommandScreen;
use crate::hook::{EventKind, HookEvent, ResponseKind};
use crate::registration::HookRegistration;

/// Exit codes for hook dispatch. Decisions (deny, continue=false) travel in
/// the JSON response; a non-zero status means the hook itself failed.
pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

pub async fn run(action: HookAction, config: &Config) -> Result<()> {
    match action {
        HookAction::Dispatch { event, payload } => dispatch(event.as_deref(), payload.as_deref(), config).await,
        HookAction::List { format } => list(OutputFormat::resolve(format), config),
    }
}

/// Build the dispatch table from config toggles
fn build_dispatcher(config: &Config) -> HookDispatcher {
    let mut dispatcher = HookDispatcher::new();

    if config.handlers.screen_enabled {
        let screen = Arc::new(CommandScreen::new());
        dispatcher.register(HookEvent::BeforeShellExecution, screen.clone());
        dispatcher.register(HookEvent::BeforeMcpExecution, screen);
    }

    if config.handlers.read_guard_enabled {
        dispatcher.register(HookEvent::BeforeReadFile, Arc::new(ReadGuard::new()));
    }

    if config.handlers.audit_enabled {
        let audit = Arc::new(AuditHandler::new(config.audit.clone()));
        dispatcher.register(HookEvent::AfterFileEdit, audit.clone());
        dispatcher.register(HookEvent::BeforeSubmitPrompt, audit.clone());
        dispatcher.register(HookEvent::Stop, audit);
    }

    dispatcher
}

async fn dispatch(event: Option<&str>, payload: Option<&str>, config: &Config) -> Result<()> {
    // Read payload from stdin if not provided
    let payload_str = match payload {
        Some(p) => p.to_string(),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read payload from stdin")?;
            buffer
        }
    };

    let value: serde_json::Value = serde_json::from_str(&payload_str).context("Failed to parse payload JSON")?;

    // When the invoker names the event it expects, check the payload's own
    // claim before decoding any further
    if let Some(name) = event {
        let expected = HookEvent::from_str(name).ok_or_else(|| eyre::eyre!("Unknown hook event: {}", name))?;
        if !guard::is_payload_of(&value, expected) {
            let claimed = guard::claimed_event(&value)
                .map(|e| e.wire_name())
                .unwrap_or("nothing recognizable");
            eyre::bail!("Payload does not claim event '{}' (claims {})", expected, claimed);
        }
    }

    let payload = HookPayload::from_value(value).context("Payload does not match its declared event shape")?;

    log::info!("Dispatching hook event: {}", payload.event());
    log::debug!("Payload: {}", payload_str);

    let dispatcher = build_dispatcher(config);

    match dispatcher.dispatch(&payload).await {
        Ok(Some(response)) => {
            println!("{}", serde_json::to_string(&response)?);
        }
        Ok(None) => {
            // Notification events produce nothing on stdout
        }
        Err(e) => {
            log::error!("Dispatch failed: {}", e);
            eprintln!("hookgate: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }

    std::process::exit(EXIT_OK);
}

/// One row of `hook list` output
#[derive(Debug, Serialize)]
struct EventSummary {
    event: &'static str,
    kind: &'static str,
    response: &'static str,
    handler: bool,
    commands: usize,
}

fn list(format: OutputFormat, config: &Config) -> Result<()> {
    let dispatcher = build_dispatcher(config);

    // Registration is optional context here; a missing file just means no
    // external commands are wired up
    let registration = HookRegistration::load(Config::expand_path(&config.registration)).ok();

    let summaries: Vec<EventSummary> = HookEvent::ALL
        .into_iter()
        .map(|event| EventSummary {
            event: event.wire_name(),
            kind: match event.kind() {
                EventKind::Request => "request",
                EventKind::Notification => "notification",
            },
            response: match event.response_kind() {
                ResponseKind::Permission => "permission (allow|deny|ask)",
                ResponseKind::ReadPermission => "permission (allow|deny)",
                ResponseKind::Continue => "continue (bool)",
                ResponseKind::None => "none",
            },
            handler: dispatcher.has_handler(event),
            commands: registration.as_ref().map(|r| r.entries_for(event).len()).unwrap_or(0),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&summaries)?);
        }
        OutputFormat::Text => {
            println!("{}", "Hook events:".bold());
            println!();
            for summary in &summaries {
                let marker = if summary.handler { "✓".green() } else { "·".dimmed() };
                println!(
                    "  {} {} {} → {}",
                    marker,
                    summary.event.cyan(),
                    format!("({})", summary.kind).dimmed(),
                    summary.response
                );
                if summary.commands > 0 {
                    println!("      {} registered command(s)", summary.commands);
                }
            }
            println!();
            println!(
                "{} = built-in handler wired, {} = nothing registered",
                "✓".green(),
                "·".dimmed()
            );
        }
    }

    Ok(())
}
