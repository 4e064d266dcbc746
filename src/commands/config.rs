use colored::*;
use eyre::Result;

use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Config;

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
        ConfigAction::Get { key } => get(&key, config),
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Text => {
            println!("{}", "hookgate Configuration".bold());
            println!();

            println!("log_level: {}", config.log_level.as_filter());
            println!("registration: {}", config.registration.display());
            println!();

            println!("{}:", "handlers".cyan());
            println!("  screen_enabled: {}", config.handlers.screen_enabled);
            println!("  read_guard_enabled: {}", config.handlers.read_guard_enabled);
            println!("  audit_enabled: {}", config.handlers.audit_enabled);
            println!();

            println!("{}:", "audit".cyan());
            println!("  enabled: {}", config.audit.enabled);
            println!("  include_payload: {}", config.audit.include_payload);
            println!("  path: {}", config.audit.path.display());
        }
    }

    Ok(())
}

fn get(key: &str, config: &Config) -> Result<()> {
    let value = match key {
        "log_level" | "log-level" => Some(config.log_level.as_filter().to_string()),
        "registration" => Some(config.registration.display().to_string()),
        "handlers.screen_enabled" => Some(config.handlers.screen_enabled.to_string()),
        "handlers.read_guard_enabled" => Some(config.handlers.read_guard_enabled.to_string()),
        "handlers.audit_enabled" => Some(config.handlers.audit_enabled.to_string()),
        "audit.enabled" => Some(config.audit.enabled.to_string()),
        "audit.include_payload" => Some(config.audit.include_payload.to_string()),
        "audit.path" => Some(config.audit.path.display().to_string()),
        _ => None,
    };

    match value {
        Some(v) => println!("{}", v),
        None => {
            eprintln!("{} Unknown config key: {}", "✗".red(), key);
            std::process::exit(1);
        }
    }

    Ok(())
}
