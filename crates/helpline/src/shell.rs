// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `helpline shell` command implementation.
//!
//! Reads one query per line, streams the reply to stdout, and prints the
//! `> ` marker for the next query. `quit` in any case ends the session.

use std::io::{IsTerminal, Write};

use colored::Colorize;
use helpline_agent::{SupportHandler, SupportResponse};
use helpline_core::{HelplineError, Query};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

/// Identity attached to every interactive query.
pub const USER_ID: &str = "user-chat";
pub const TICKET_TYPE: &str = "chat";
pub const CHANNEL: &str = "live-chat";

const PROMPT: &str = "> ";

/// True for the exit command.
fn is_quit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("quit")
}

/// One-line summary of how a reply was produced.
fn status_line(response: &SupportResponse) -> String {
    format!(
        "[{} query, {}, context: {}]",
        response.complexity, response.model, response.context_status
    )
}

/// Runs the interactive chat loop until `quit`, Ctrl+C or Ctrl+D.
///
/// Provider errors are printed and the loop continues.
pub async fn run_shell(handler: &SupportHandler) -> Result<(), HelplineError> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| HelplineError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "Customer Support Chatbot".bold().green());
    println!("Enter {} to exit.\n", "'quit'".yellow());

    // rustyline only draws the prompt on a terminal.
    let piped = !std::io::stdin().is_terminal();

    loop {
        if piped {
            print!("{PROMPT}");
            let _ = std::io::stdout().flush();
        }
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };

        if is_quit(&line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line.as_str());

        let query = Query::new(line, USER_ID, TICKET_TYPE, CHANNEL);
        let mut stdout = std::io::stdout();
        let outcome = handler
            .handle_with(&query, |chunk| {
                let _ = write!(stdout, "{chunk}");
                let _ = stdout.flush();
            })
            .await;

        match outcome {
            Ok(response) => {
                println!();
                println!("{}", status_line(&response).dimmed());
                debug!(chars = response.content.len(), "reply printed");
            }
            Err(e) => {
                println!();
                eprintln!("{}: {e}", "error".red());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpline_router::Complexity;
    use helpline_tools::ContextStatus;

    #[test]
    fn quit_is_case_insensitive() {
        assert!(is_quit("quit"));
        assert!(is_quit("QUIT"));
        assert!(is_quit("Quit\n"));
        assert!(!is_quit("quitting"));
        assert!(!is_quit("please quit"));
    }

    #[test]
    fn status_line_names_route_and_context() {
        let response = SupportResponse {
            content: String::new(),
            model: "gemini-pro".into(),
            complexity: Complexity::Complex,
            context_status: ContextStatus::NoResults,
        };
        assert_eq!(
            status_line(&response),
            "[complex query, gemini-pro, context: no_results]"
        );
    }
}
