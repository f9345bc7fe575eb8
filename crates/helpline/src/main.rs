// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpline - customer support chatbot.
//!
//! This is the binary entry point.

mod shell;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use helpline_agent::SupportHandler;
use helpline_config::HelplineConfig;
use helpline_core::{HealthStatus, HelplineError, PluginAdapter, Query};
use helpline_gemini::GeminiProvider;
use helpline_tools::ToolOrchestrator;

/// Helpline - customer support chatbot.
#[derive(Parser, Debug)]
#[command(name = "helpline", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive chat loop (default).
    Shell,
    /// Answer one query and exit.
    Ask {
        /// Query text; multiple words are joined with spaces.
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List the tools advertised by the document tool server.
    Tools,
    /// Validate configuration and the tool server map.
    CheckConfig {
        /// Also print the effective configuration.
        #[arg(long)]
        show: bool,
        /// Also ask the model provider whether the API key works.
        #[arg(long)]
        online: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => helpline_config::load_and_validate_path(path),
        None => helpline_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            helpline_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => match build_handler(&config) {
            Ok(handler) => shell::run_shell(&handler).await,
            Err(e) => Err(e),
        },
        Commands::Ask { text } => ask(&config, &text.join(" ")).await,
        Commands::Tools => list_tools(&config).await,
        Commands::CheckConfig { show, online } => check_config(&config, show, online).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
            ExitCode::FAILURE
        }
    }
}

fn build_handler(config: &HelplineConfig) -> Result<SupportHandler, HelplineError> {
    let provider = GeminiProvider::from_config(config)?;
    Ok(SupportHandler::from_config(config, Arc::new(provider)))
}

async fn ask(config: &HelplineConfig, text: &str) -> Result<(), HelplineError> {
    let handler = build_handler(config)?;
    let query = Query::new(text, shell::USER_ID, shell::TICKET_TYPE, shell::CHANNEL);
    let mut stdout = std::io::stdout();
    handler
        .handle_with(&query, |chunk| {
            let _ = write!(stdout, "{chunk}");
            let _ = stdout.flush();
        })
        .await?;
    println!();
    Ok(())
}

async fn list_tools(config: &HelplineConfig) -> Result<(), HelplineError> {
    let orchestrator = ToolOrchestrator::from_config(config);
    let tools = orchestrator.list_tools().await?;
    if tools.is_empty() {
        println!("{} advertises no tools", orchestrator.server());
    }
    for tool in tools {
        println!("{}  {}", tool.name.bold(), tool.description);
    }
    Ok(())
}

async fn check_config(
    config: &HelplineConfig,
    show: bool,
    online: bool,
) -> Result<(), HelplineError> {
    let servers = match helpline_config::load_servers_strict(config) {
        Ok(servers) => servers,
        Err(e) => {
            helpline_config::render_errors(&[e]);
            return Err(HelplineError::Config("tool server map is invalid".into()));
        }
    };
    if servers.get(&config.tools.server).is_none() {
        eprintln!(
            "{}: tool server \"{}\" is not defined in {}",
            "warning".yellow(),
            config.tools.server,
            config.tools.config_path
        );
    }
    println!(
        "config OK (agent.name={}, tool servers: {}, default model: {})",
        config.agent.name,
        servers.len(),
        config.gemini.default_model
    );
    if show {
        print!("\n{}", helpline_config::render_effective(config)?);
    }
    if online {
        check_provider(config).await?;
    }
    Ok(())
}

/// Reports the provider health check. Unhealthy is an error.
async fn check_provider(config: &HelplineConfig) -> Result<(), HelplineError> {
    let provider = GeminiProvider::from_config(config)?;
    match provider.health_check().await? {
        HealthStatus::Healthy => {
            println!("provider {}: {}", provider.name(), "healthy".green());
            Ok(())
        }
        HealthStatus::Degraded(reason) => {
            println!("provider {}: {} ({reason})", provider.name(), "degraded".yellow());
            Ok(())
        }
        HealthStatus::Unhealthy(reason) => Err(HelplineError::Provider {
            message: format!("provider {} unhealthy: {reason}", provider.name()),
            source: None,
        }),
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so replies on stdout stay clean.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("helpline={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
