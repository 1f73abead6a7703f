//! Interactive chat command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, mut settings: Settings) -> Result<()> {
    if let Some(model) = model {
        settings.llm.model = model;
    }

    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Agent, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let spinner = Output::spinner("Indexing course catalog...");
    let orchestrator = Orchestrator::new(settings).await;
    spinner.finish_and_clear();
    let orchestrator = orchestrator?;

    if !orchestrator.index().is_available() {
        Output::warning("Course catalog is not available; answers will rely on web search.");
    }

    let agent = Arc::new(orchestrator.create_agent()?);
    let mut session = orchestrator.new_session(agent);

    println!("\n{}", style("Kurs Chat").bold().cyan());
    println!(
        "{}\n",
        style("Type your questions, or 'exit' to quit. Use 'history' to show the conversation.").dim()
    );
    println!("{} {}\n", style("Kurs:").cyan().bold(), session.greeting());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("history") {
            for turn in session.memory().all() {
                Output::kv(turn.speaker(), turn.text());
            }
            continue;
        }

        let spinner = Output::spinner("Thinking...");
        let reply = session.send(input).await;
        spinner.finish_and_clear();

        println!("\n{} {}\n", style("Kurs:").cyan().bold(), reply);
    }

    Ok(())
}
