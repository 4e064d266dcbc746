//! Validate a hook registration file

use colored::*;
use eyre::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::hook::HookEvent;
use crate::registration::HookRegistration;

pub fn run(path: Option<PathBuf>, config: &Config) -> Result<()> {
    let path = path.unwrap_or_else(|| Config::expand_path(&config.registration));

    println!("{} Validating {}", "→".blue(), path.display());

    let registration = HookRegistration::load(&path).context(format!("Failed to load {}", path.display()))?;

    match registration.validate() {
        Ok(()) => {
            println!("  {} version {}", "✓".green(), registration.version);
            for event in HookEvent::ALL {
                let entries = registration.entries_for(event);
                if !entries.is_empty() {
                    println!("  {} {}: {} command(s)", "✓".green(), event.to_string().cyan(), entries.len());
                }
            }
            if !registration.has_hooks() {
                println!("  {} No commands registered for any event", "⚠".yellow());
            }
            println!();
            println!("{} Registration is valid", "✓".green().bold());
            Ok(())
        }
        Err(e) => {
            log::error!("Invalid registration {}: {}", path.display(), e);
            eprintln!("{} {}", "✗".red(), e);
            std::process::exit(1);
        }
    }
}
