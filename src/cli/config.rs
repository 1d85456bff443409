use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::driver::http::DEFAULT_ENDPOINT;
use crate::wait::poller::DEFAULT_POLL_INTERVAL_SECS;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "ui-navigator.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "ui-navigator",
    version,
    about = "Model-based navigation of desktop application UIs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: ui-navigator.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append one JSON line per executed command to this file
    #[arg(long, global = true)]
    pub trace_file: Option<String>,

    /// Start with debug messages switched on
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the shortest route between two states without executing it
    Plan {
        /// Navigation model (YAML, or JSON by extension)
        #[arg(long)]
        model: String,

        /// State the application is in now
        #[arg(long)]
        from: String,

        /// State to reach
        #[arg(long)]
        to: String,

        /// Object repository used to resolve locator names
        #[arg(long)]
        repository: Option<String>,
    },

    /// Drive the application from one state to another
    Navigate {
        /// Navigation model (YAML, or JSON by extension)
        #[arg(long)]
        model: String,

        /// State the application is in now
        #[arg(long)]
        from: String,

        /// State to reach
        #[arg(long)]
        to: String,

        /// Object repository used to resolve locator names
        #[arg(long)]
        repository: String,

        /// Re-read the model and repository even if cached
        #[arg(long)]
        force_reload: bool,
    },

    /// Print the element kind a locator resolves to
    Kind {
        /// Element locator, e.g. /form/button[@id='ok']
        locator: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `ui-navigator.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub wait: WaitConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Spawn a helper process and talk NDJSON over its stdio
    #[default]
    Process,
    /// POST each request to an HTTP endpoint
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    #[serde(default)]
    pub kind: DriverKind,

    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            kind: DriverKind::Process,
            program: default_program(),
            args: Vec::new(),
            endpoint: default_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,

    #[serde(default)]
    pub debug: bool,
}

// Serde default helpers
fn default_program() -> String { "ui-driver".to_string() }
fn default_endpoint() -> String { DEFAULT_ENDPOINT.to_string() }
fn default_poll_interval() -> u64 { DEFAULT_POLL_INTERVAL_SECS }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content),
        Err(_) => AppConfig::default(),
    }
}

/// Parse config text, falling back to defaults when it is malformed.
pub fn parse_config(content: &str) -> AppConfig {
    match serde_yaml::from_str(content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed config file");
            AppConfig::default()
        }
    }
}
