//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for jokebook
#[derive(Parser, Debug)]
#[command(name = "jokebook")]
#[command(author, version, about = "Tell a joke, count down, reveal the punchline")]
#[command(long_about = r#"
Jokebook tells a random joke in three steps:
1. Question: the joke's question is shown
2. Countdown: a timer ticks down once per second
3. Reveal: the punchline is shown and the joke is archived

Category hints (chicken, anti, lawyer) pick the kind of joke; anything
else tells a joke from any category.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./jokebook.toml     Project-level config
3. ~/.config/jokebook/config.toml   Global config

Example:
  jokebook
  jokebook tell me a lawyer joke
  jokebook --countdown 3 chicken
  jokebook -i
"#)]
pub struct Cli {
    /// Category hints, e.g. `chicken`, `anti` or `lawyer`
    pub hints: Vec<String>,

    /// Keep telling jokes interactively (another / quit)
    #[arg(short, long)]
    pub interactive: bool,

    /// Category to use instead of resolving hints
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Seconds to count down before the punchline
    #[arg(long, value_name = "SECS")]
    pub countdown: Option<u32>,

    /// Append told jokes to this JSONL file
    #[arg(long, value_name = "PATH", conflicts_with = "no_archive")]
    pub archive: Option<PathBuf>,

    /// Do not archive told jokes
    #[arg(long)]
    pub no_archive: bool,

    /// List the joke catalog and exit
    #[arg(long)]
    pub list: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the countdown progress bar and colors
    #[arg(short, long)]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
