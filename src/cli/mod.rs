//! CLI module for Kurs.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Kurs - Course catalog assistant
///
/// Answers questions about a course catalog with a reasoning agent that can
/// search the catalog and the web.
#[derive(Parser, Debug)]
#[command(name = "kurs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Ask a single question
    Ask {
        /// The question to ask
        question: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Print the agent's reasoning steps
        #[arg(long)]
        steps: bool,
    },

    /// Search the course catalog without the language model
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "3")]
        limit: usize,

        /// Minimum similarity score (-1.0 to 1.0)
        #[arg(short, long)]
        min_score: Option<f32>,
    },

    /// Build the catalog index and report what was indexed
    Index {
        /// Course CSV file (overrides the configured path)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_flags() {
        let cli = Cli::parse_from(["kurs", "-vv", "ask", "Any goat courses?", "--steps"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Ask { question, steps, model } => {
                assert_eq!(question, "Any goat courses?");
                assert!(steps);
                assert!(model.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_defaults() {
        let cli = Cli::parse_from(["kurs", "search", "tailoring"]);
        assert!(matches!(
            cli.command,
            Commands::Search { limit: 3, min_score: None, .. }
        ));
    }
}
