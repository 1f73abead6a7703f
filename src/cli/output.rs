//! CLI output formatting utilities.

use crate::agent::AgentStep;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print indexed course info.
    pub fn course_info(title: &str, chunks: usize) {
        println!(
            "  {} {} ({} chunk{})",
            style("*").cyan(),
            style(title).bold(),
            chunks,
            if chunks == 1 { "" } else { "s" }
        );
    }

    /// Print search result.
    pub fn search_result(title: &str, score: f32, content: &str) {
        println!(
            "\n{} {} (score: {:.2})",
            style(">>").green(),
            style(title).bold(),
            score
        );
        println!("   {}", content_preview(content, 200));
    }

    /// Print one reasoning step of the agent.
    pub fn agent_step(index: usize, step: &AgentStep) {
        let action = match (&step.action, &step.action_input) {
            (Some(name), Some(input)) => format!("{}({})", name, input),
            _ => "no action".to_string(),
        };
        println!("  {} {}", style(format!("[{}]", index)).dim(), style(action).cyan());
        if !step.thought.is_empty() {
            println!("      {} {}", style("thought:").dim(), content_preview(&step.thought, 160));
        }
        println!("      {} {}", style("observation:").dim(), content_preview(&step.observation, 160));
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis, counting characters.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        format!("{}...", content.chars().take(max_chars).collect::<String>())
    }
}
