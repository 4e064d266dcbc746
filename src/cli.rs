use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "hookgate",
    about = "Permission gate and dispatcher for agent hook events",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/hookgate/logs/hookgate.log\n\nResponses go to stdout, diagnostics to stderr; a non-zero exit means the hook failed, not that it denied."
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to hookgate.yaml config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize hookgate configuration
    Init {
        /// Directory to initialize (defaults to ~/.config/hookgate)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Diagnose setup issues
    Doctor,

    /// Validate a hook registration file
    Validate {
        /// Registration file to check (defaults to the configured one)
        path: Option<PathBuf>,
    },

    /// Handle hook events from the agent
    Hook {
        #[command(subcommand)]
        action: HookAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum HookAction {
    /// Dispatch a hook payload to the registered handler
    Dispatch {
        /// Expected event (before-shell-execution, stop, ...); checked
        /// against the payload's own claim, inferred when omitted
        event: Option<String>,

        /// Event payload JSON (reads from stdin if not provided)
        #[arg(long)]
        payload: Option<String>,
    },

    /// List hook events, their shapes, and what is wired to them
    List {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (dot notation)
        key: String,
    },
}
