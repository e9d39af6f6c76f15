//! deepclick - shadow-DOM and iframe aware clicking over CDP.
//!
//! Opens a page, runs one browser tool against it and prints the message a
//! planning loop would receive.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use deepclick_config::{ConfigValidator, LoggingConfig};
use deepclick_protocols::tool::{AbortSignal, Tool, ToolContext, ToolResult};
use deepclick_telemetry::EventCollector;
use deepclick_tools_browser::{BrowserManager, BrowserManagerConfig, ClickSkill, browser_tools};

use cli::{Cli, CliError, Commands};

/// Initialize tracing with console (stderr) and daily-rotated file output.
fn init_tracing(logging: &LoggingConfig) -> Result<(), CliError> {
    std::fs::create_dir_all(&logging.log_dir)
        .map_err(|e| CliError::Logging(format!("{}: {}", logging.log_dir.display(), e)))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("deepclick")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&logging.log_dir)
        .map_err(|e| CliError::Logging(e.to_string()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the file writer flushing for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let config = cli.load_config()?;
    init_tracing(&config.logging)?;

    for warning in ConfigValidator::validate(&config).into_result()? {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    let telemetry = Arc::new(EventCollector::from_config(&config.telemetry));
    let manager = Arc::new(BrowserManager::new(BrowserManagerConfig::from(&config.browser)));
    let skill = Arc::new(ClickSkill::new(
        manager.clone(),
        telemetry.clone(),
        &config.interaction,
    ));
    let tools = browser_tools(skill);

    let (tool_id, url, params) = match cli.command {
        Commands::Tools => {
            let specs: Vec<Value> = tools
                .iter()
                .map(|tool| tool.definition().to_function_spec())
                .collect();
            println!("{}", serde_json::to_string_pretty(&specs)?);
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Click { selector, url, wait } => (
            "browser_click",
            url,
            json!({ "selector": selector, "wait_before_execution": wait }),
        ),
        Commands::Exists { selector, url } => {
            ("browser_element_exists", url, json!({ "selector": selector }))
        }
    };

    let tool = tools
        .iter()
        .find(|tool| tool.definition().id == tool_id)
        .ok_or_else(|| CliError::UnknownTool(tool_id.to_string()))?;

    info!("Starting deepclick v{}", env!("CARGO_PKG_VERSION"));
    let result = run_tool(&manager, tool.as_ref(), &url, params).await;

    debug!(summary = %telemetry.build_final_message(), "Telemetry summary");
    if let Err(e) = manager.shutdown_chrome().await {
        warn!("Failed to shut down Chrome: {}", e);
    }

    let result = result?;
    println!("{}", result.content);
    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Open `url` and execute `tool`; Ctrl-C aborts the pending interaction.
async fn run_tool(
    manager: &BrowserManager,
    tool: &dyn Tool,
    url: &str,
    params: Value,
) -> Result<ToolResult, CliError> {
    tool.validate(&params)?;
    manager.new_page(url).await?;

    let abort = Arc::new(AbortSignal::new());
    let ctx = ToolContext::new("cli").with_abort_signal(abort.clone());
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, abandoning the interaction");
            abort.abort();
        }
    });

    let result = tool.execute(params, ctx).await;
    interrupt.abort();
    Ok(result?)
}
