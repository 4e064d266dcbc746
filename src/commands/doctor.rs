//! Diagnose hookgate setup issues

use colored::*;
use eyre::Result;

use crate::config::Config;
use crate::hook::HookEvent;
use crate::registration::HookRegistration;

pub fn run(config: &Config) -> Result<()> {
    println!("{}", "hookgate Doctor".bold());
    println!("{}", "═".repeat(50));
    println!();

    let mut issues = 0;

    // Check hookgate directory
    let hookgate_dir = Config::hookgate_dir();
    if hookgate_dir.exists() {
        println!("{} hookgate directory: {}", "✓".green(), hookgate_dir.display());
    } else {
        println!("{} hookgate directory missing: {}", "✗".red(), hookgate_dir.display());
        println!("  Run {} to create it", "hookgate init".cyan());
        issues += 1;
    }

    // Check config file
    let config_file = hookgate_dir.join("hookgate.yaml");
    if config_file.exists() {
        println!("{} Config file: {}", "✓".green(), config_file.display());
    } else {
        println!("{} Config file missing: {}", "⚠".yellow(), config_file.display());
        println!("  Using built-in defaults");
    }

    // Check registration file
    let registration_path = Config::expand_path(&config.registration);
    if registration_path.exists() {
        match HookRegistration::load(&registration_path) {
            Ok(registration) => match registration.validate() {
                Ok(()) => {
                    let wired = HookEvent::ALL
                        .into_iter()
                        .filter(|e| !registration.entries_for(*e).is_empty())
                        .count();
                    println!(
                        "{} Registration: {} ({} of {} events wired)",
                        "✓".green(),
                        registration_path.display(),
                        wired,
                        HookEvent::ALL.len()
                    );
                }
                Err(e) => {
                    println!("{} Registration invalid: {}", "✗".red(), e);
                    issues += 1;
                }
            },
            Err(e) => {
                println!("{} Registration unreadable: {}", "✗".red(), e);
                issues += 1;
            }
        }
    } else {
        println!(
            "{} Registration missing: {}",
            "✗".red(),
            registration_path.display()
        );
        println!("  Run {} to create a starter file", "hookgate init".cyan());
        issues += 1;
    }

    // Check audit path is writable when the audit handler is on
    if config.handlers.audit_enabled && config.audit.enabled {
        let audit_path = Config::expand_path(&config.audit.path);
        match std::fs::create_dir_all(&audit_path) {
            Ok(()) => println!("{} Audit path: {}", "✓".green(), audit_path.display()),
            Err(e) => {
                println!("{} Audit path not writable: {} ({})", "✗".red(), audit_path.display(), e);
                issues += 1;
            }
        }
    }

    // Check at least one handler is enabled; dispatch with an empty table
    // can only ever report "no handler"
    if !config.handlers.screen_enabled && !config.handlers.read_guard_enabled && !config.handlers.audit_enabled {
        println!("{} All built-in handlers are disabled", "⚠".yellow());
        println!("  Every dispatch will exit non-zero with a no-handler error");
    }

    println!();
    if issues == 0 {
        println!("{} No issues found", "✓".green().bold());
        Ok(())
    } else {
        println!("{} {} issue(s) found", "✗".red().bold(), issues);
        std::process::exit(1);
    }
}
