//! REPL (Read-Eval-Print Loop) for telling jokes one after another

use crate::ConsoleFormatter;
use colored::Colorize;
use jokebook_application::{SessionHandle, TellJokeError, TellJokeUseCase};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Tell another joke from the last category (empty line, `another`, `a`)
    Another,
    /// Stop the current joke and leave
    Quit,
    Help,
    /// Print the joke catalog
    List,
    /// Free text, resolved to a category from its words
    Request(Vec<String>),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" | "another" | "a" | "/another" => Self::Another,
            "quit" | "exit" | "q" | "/quit" | "/exit" | "/q" => Self::Quit,
            "help" | "h" | "?" | "/help" | "/h" | "/?" => Self::Help,
            "list" | "/list" => Self::List,
            _ => Self::Request(line.split_whitespace().map(str::to_string).collect()),
        }
    }
}

/// Interactive joke REPL
pub struct JokeRepl {
    use_case: Arc<TellJokeUseCase>,
}

impl JokeRepl {
    pub fn new(use_case: Arc<TellJokeUseCase>) -> Self {
        Self { use_case }
    }

    /// Run the interactive REPL until `quit` or end of input
    pub async fn run(&self) -> std::io::Result<()> {
        self.print_welcome();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if self.handle(ReplCommand::parse(&line)) {
                return Ok(());
            }
        }

        debug!("stdin closed, leaving REPL");
        self.use_case.quit();
        Ok(())
    }

    /// Handle one command. Returns true if should exit.
    pub fn handle(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Another => report(self.use_case.tell_another()),
            ReplCommand::Quit => {
                self.use_case.quit();
                return true;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::List => {
                println!("{}", ConsoleFormatter::format_catalog(self.use_case.catalog()));
            }
            ReplCommand::Request(words) => report(self.use_case.request_joke(words.as_slice())),
        }
        false
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              Jokebook - REPL                │");
        println!("╰─────────────────────────────────────────────╯");
        Self::print_help();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  <enter>, another, a  - Tell another joke of the same kind");
        println!("  chicken / anti / lawyer ... - Ask for a kind of joke");
        println!("  list                 - Show all jokes");
        println!("  help, h, ?           - Show this help");
        println!("  quit, exit, q        - Exit");
        println!();
    }
}

fn report(result: Result<SessionHandle, TellJokeError>) {
    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
    }
}
