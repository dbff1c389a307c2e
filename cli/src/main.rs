//! CLI entrypoint for jokebook
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use jokebook_application::{ArchiveSink, DisplaySink, NoArchive, TellJokeUseCase};
use jokebook_domain::{Category, JokeCatalog};
use jokebook_infrastructure::{ConfigLoader, FileConfig, JsonlJokeArchive};
use jokebook_presentation::{Cli, ConsoleDisplay, ConsoleFormatter, JokeRepl, SimpleDisplay};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines reach the file
    let _log_guard = init_logging(&cli)?;

    info!("Starting jokebook");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    if let Some(seconds) = cli.countdown {
        config.reveal.countdown_seconds = seconds;
    }
    config.validate().context("Invalid configuration")?;

    if cli.quiet || !config.output.color {
        colored::control::set_override(false);
    }

    let catalog = Arc::new(JokeCatalog::builtin());

    if cli.list {
        println!("{}", ConsoleFormatter::format_catalog(&catalog));
        return Ok(());
    }

    let category = cli
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?;

    // === Dependency Injection ===
    let reveal = config.reveal_config();
    let display: Arc<dyn DisplaySink> = if cli.quiet || !config.output.show_progress {
        Arc::new(SimpleDisplay)
    } else {
        Arc::new(ConsoleDisplay::new(reveal.countdown_seconds))
    };
    let archive = build_archive(&cli, &config);

    let use_case = Arc::new(TellJokeUseCase::new(catalog, display, archive, reveal));

    let first = match category {
        Some(category) => use_case.request_category(category)?,
        None => use_case.request_joke(cli.hints.as_slice())?,
    };

    if cli.interactive {
        JokeRepl::new(use_case.clone()).run().await?;
    } else {
        tokio::select! {
            state = first.wait_terminal() => {
                debug!("Joke session {} finished as {}", first.id(), state.as_str());
            }
            _ = tokio::signal::ctrl_c() => {
                use_case.quit();
            }
        }
    }

    use_case.shutdown().await;
    Ok(())
}

/// Initialize tracing based on verbosity, optionally writing to a file
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(log_file) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = log_file
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", log_file.display()))?;
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

/// Pick the archive sink; an unusable archive never blocks telling jokes
fn build_archive(cli: &Cli, config: &FileConfig) -> Arc<dyn ArchiveSink> {
    if cli.no_archive || (!config.archive.enabled && cli.archive.is_none()) {
        debug!("Archiving disabled");
        return Arc::new(NoArchive);
    }

    let Some(path) = cli.archive.clone().or_else(|| config.archive_path()) else {
        warn!("No data directory available, archiving disabled");
        return Arc::new(NoArchive);
    };

    match JsonlJokeArchive::open(&path) {
        Ok(archive) => {
            info!("Archiving jokes to {}", archive.path().display());
            Arc::new(archive)
        }
        Err(e) => {
            warn!("Could not open joke archive {}: {}", path.display(), e);
            Arc::new(NoArchive)
        }
    }
}
