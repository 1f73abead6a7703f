//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::session::apology;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    question: &str,
    model: Option<String>,
    show_steps: bool,
    mut settings: Settings,
) -> Result<()> {
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
    let agent = orchestrator.create_agent()?;

    let spinner = Output::spinner("Thinking...");
    let result = agent.handle(question, &[]).await;
    spinner.finish_and_clear();

    match result {
        Ok(response) => {
            println!("\n{}\n", response.output);

            if show_steps {
                Output::header("Steps");
                for (i, step) in response.steps.iter().enumerate() {
                    Output::agent_step(i + 1, step);
                }
                Output::kv("Iterations", &response.iterations.to_string());
                Output::kv("Outcome", &format!("{:?}", response.outcome));
            }
        }
        Err(e) => {
            println!("\n{}\n", apology(&e));
            return Err(e.into());
        }
    }

    Ok(())
}
