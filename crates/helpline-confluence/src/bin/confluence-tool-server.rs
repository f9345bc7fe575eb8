// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `confluence-tool-server <tool> --params '<json>'`
//!
//! Prints one sentinel-wrapped JSON result on stdout and always exits 0.
//! Logs go to stderr.

use clap::Parser;
use clap::error::ErrorKind;
use helpline_confluence::{ToolServer, parse_params, render_output};
use helpline_tools::ToolInvocationResult;
use serde_json::Map;

#[derive(Parser, Debug)]
#[command(name = "confluence-tool-server", version, about = "Confluence document tools")]
struct Cli {
    /// Tool to run: search, getPageContent or listTools.
    tool: Option<String>,

    /// Tool parameters as a JSON object.
    #[arg(long)]
    params: Option<String>,
}

fn failure(message: String) -> ToolInvocationResult {
    ToolInvocationResult {
        success: false,
        message,
        data: Map::new(),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let result = match Cli::try_parse() {
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => failure(format!("invalid arguments: {}", e.kind())),
        Ok(cli) => match parse_params(cli.params.as_deref()) {
            Err(message) => failure(message),
            Ok(params) => {
                let tool = cli.tool.unwrap_or_default();
                ToolServer::from_env().dispatch(&tool, &params).await
            }
        },
    };

    println!("{}", render_output(&result));
}
