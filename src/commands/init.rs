//! Initialize hookgate configuration

use colored::*;
use eyre::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;

/// Starter registration wiring every event to this binary
const DEFAULT_REGISTRATION: &str = r#"{
  "version": 1,
  "hooks": {
    "beforeShellExecution": [
      {"command": "hookgate hook dispatch before-shell-execution"}
    ],
    "beforeMCPExecution": [
      {"command": "hookgate hook dispatch before-mcp-execution"}
    ],
    "afterFileEdit": [
      {"command": "hookgate hook dispatch after-file-edit"}
    ],
    "beforeReadFile": [
      {"command": "hookgate hook dispatch before-read-file"}
    ],
    "beforeSubmitPrompt": [
      {"command": "hookgate hook dispatch before-submit-prompt"}
    ],
    "stop": [
      {"command": "hookgate hook dispatch stop"}
    ]
  }
}
"#;

pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let hookgate_dir = path.unwrap_or_else(Config::hookgate_dir);

    println!("{} Initializing hookgate in {}", "→".blue(), hookgate_dir.display());

    // Check if already initialized
    let config_file = hookgate_dir.join("hookgate.yaml");
    if config_file.exists() && !force {
        println!(
            "  {} hookgate already initialized at {}",
            "✓".green(),
            hookgate_dir.display()
        );
        println!("  Use {} to reinitialize", "--force".cyan());
        return Ok(());
    }

    // Create directory structure
    for dir in ["audit", "logs"] {
        let dir_path = hookgate_dir.join(dir);
        fs::create_dir_all(&dir_path).context(format!("Failed to create {}", dir))?;
        println!("  {} Created {}/", "✓".green(), dir);
    }

    // Generate default config
    let config = Config::default();
    let yaml_str = serde_yaml::to_string(&config).context("Failed to serialize config")?;
    fs::write(&config_file, yaml_str).context("Failed to write hookgate.yaml")?;
    println!("  {} Created hookgate.yaml", "✓".green());

    // Write the starter registration
    let registration_file = hookgate_dir.join("hooks.json");
    fs::write(&registration_file, DEFAULT_REGISTRATION).context("Failed to write hooks.json")?;
    println!("  {} Created hooks.json", "✓".green());

    println!();
    println!("{} hookgate initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run {} to verify setup", "hookgate doctor".cyan());
    println!("  2. Point your agent's hook configuration at {}", "hooks.json".cyan());
    println!(
        "  3. Try it: {}",
        "echo '{...}' | hookgate hook dispatch before-shell-execution".cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::HookRegistration;

    #[test]
    fn test_default_registration_is_valid() {
        let registration = HookRegistration::from_str(DEFAULT_REGISTRATION).unwrap();
        assert!(registration.validate().is_ok());
        assert!(registration.has_hooks());
    }

    #[test]
    fn test_init_writes_files() {
        let temp = tempfile::tempdir().unwrap();
        run(Some(temp.path().to_path_buf()), false).unwrap();

        assert!(temp.path().join("hookgate.yaml").exists());
        assert!(temp.path().join("hooks.json").exists());
        assert!(temp.path().join("audit").is_dir());
    }

    #[test]
    fn test_init_respects_existing_config() {
        let temp = tempfile::tempdir().unwrap();
        run(Some(temp.path().to_path_buf()), false).unwrap();

        // Mark the config, re-init without force, marker must survive
        let config_file = temp.path().join("hookgate.yaml");
        fs::write(&config_file, "log_level: trace\n").unwrap();
        run(Some(temp.path().to_path_buf()), false).unwrap();
        assert_eq!(fs::read_to_string(&config_file).unwrap(), "log_level: trace\n");

        run(Some(temp.path().to_path_buf()), true).unwrap();
        assert_ne!(fs::read_to_string(&config_file).unwrap(), "log_level: trace\n");
    }
}
