//! CLI definitions for deepclick.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use deepclick_config::{Config, ConfigError, ConfigLoader};
use deepclick_protocols::ToolError;
use deepclick_tools_browser::BrowserError;

/// deepclick CLI.
#[derive(Debug, Parser)]
#[command(name = "deepclick")]
#[command(about = "Click elements through shadow roots and iframes over CDP")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Chrome remote debugging port (overrides the config file)
    #[arg(long, global = true, env = "DEEPCLICK_DEBUG_PORT")]
    pub debug_port: Option<u16>,

    /// Launch Chrome headless
    #[arg(long, global = true)]
    pub headless: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Open a page and click an element on it
    Click {
        /// CSS selector of the element
        selector: String,

        /// Page to open first
        #[arg(long)]
        url: String,

        /// Seconds to wait before clicking
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        wait: f64,
    },

    /// Open a page and check whether a selector matches
    Exists {
        /// CSS selector to look for
        selector: String,

        /// Page to open first
        #[arg(long)]
        url: String,
    },

    /// Print the function-calling specs of the browser tools
    Tools,
}

impl Cli {
    /// Load the configuration file (or defaults) and apply flag overrides.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = ConfigLoader::load_or_default(self.config.as_deref())?;
        if let Some(port) = self.debug_port {
            config.browser.debug_port = port;
        }
        if self.headless {
            config.browser.headless = true;
        }
        Ok(config)
    }
}

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),

    #[error("Failed to encode tool specs: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}
