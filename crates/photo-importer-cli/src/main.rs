mod cli;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{debug, error, warn};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use photo_importer::broadcast::{EventSink, UiEvent};
use photo_importer::config::{load_policy, FileSettingsStore};
use photo_importer::error::{ConfigError, ImporterError};
use photo_importer::import::{
    ConversionDispatcher, ImportOrchestrator, ImportOutcome, ProgressEvent, ProgressReporter,
    Selection,
};
use photo_importer::scanner::MediaScanner;
use photo_importer::thumbnail::{prefetch_thumbnails, ThumbnailCache};
use photo_importer::tools::{SystemProcessRunner, ToolPaths};

use cli::{Cli, Commands};

/// Prints one line per file as the batch advances.
struct ConsoleProgress;

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FileFinished { index, result } => {
                let status = match &result.outcome {
                    ImportOutcome::Copied => "copied".to_string(),
                    ImportOutcome::Converted => "converted".to_string(),
                    ImportOutcome::Failed { stage, .. } => format!("{} failed", stage),
                };
                let destination = result
                    .destination_path
                    .as_ref()
                    .map(|p| format!(" -> {}", p.display()))
                    .unwrap_or_default();
                println!(
                    "[{}] {}{} ({})",
                    index + 1,
                    result.source_path.display(),
                    destination,
                    status
                );
            }
            ProgressEvent::BatchCompleted { imported } => println!("Imported {} files", imported),
            _ => {}
        }
    }
}

/// Logs selection changes; there is no interactive front end to notify.
struct LogEvents;

impl EventSink for LogEvents {
    fn publish(&self, event: UiEvent) {
        debug!("{}", event.name());
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "photo_importer=debug,info"
    } else {
        "info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Route `log` records from the library through tracing
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to install log bridge: {}", e);
    }

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {}", e);
    }
}

fn settings_store(cli: &Cli) -> Result<FileSettingsStore, ConfigError> {
    cli.settings_dir
        .clone()
        .or_else(FileSettingsStore::default_directory)
        .map(FileSettingsStore::new)
        .ok_or_else(|| ConfigError::Validation {
            message: "No settings directory available; pass --settings-dir".to_string(),
        })
}

fn cache_root(cli: &Cli) -> Result<PathBuf, ConfigError> {
    cli.cache_dir
        .clone()
        .or_else(ThumbnailCache::default_root)
        .ok_or_else(|| ConfigError::Validation {
            message: "No cache directory available; pass --cache-dir".to_string(),
        })
}

fn thumbnail_cache(cli: &Cli) -> Result<ThumbnailCache, ImporterError> {
    let tools = ToolPaths::discover()?;
    Ok(ThumbnailCache::new(
        cache_root(cli)?,
        Arc::new(SystemProcessRunner::new()),
        tools.exiftool(),
    ))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ImporterError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

fn run(cli: &Cli) -> Result<ExitCode, ImporterError> {
    match &cli.command {
        Commands::Scan { dir, json } => {
            let entries = MediaScanner::new(dir).scan()?;
            if *json {
                print_json(&entries)?;
            } else {
                for entry in &entries {
                    println!(
                        "{}\t{}\t{}",
                        entry.size,
                        entry.mime_type,
                        entry.path.display()
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Import {
            files,
            invert,
            json,
        } => {
            let policy = load_policy(&settings_store(cli)?)?;
            let tools = ToolPaths::discover()?;
            if policy.convert_to_dng && !tools.is_converter_available() {
                warn!(
                    "DNG conversion is enabled but no converter was found at {}",
                    tools.dng_converter().display()
                );
            }

            let orchestrator = ImportOrchestrator::new(ConversionDispatcher::new(
                Arc::new(SystemProcessRunner::new()),
                &tools,
            ));

            let report = if *invert {
                let root = policy.source_root.as_deref().ok_or_else(|| {
                    ConfigError::Validation {
                        message: "No source disk configured".to_string(),
                    }
                })?;
                let scanned = MediaScanner::new(root).scan()?;
                let mut selection = Selection::new(scanned, Arc::new(LogEvents));
                for file in files {
                    if !selection.select(file) {
                        warn!("{} is not on the source disk", file.display());
                    }
                }
                selection.invert();
                selection.import_selected(&orchestrator, &policy, &ConsoleProgress)
            } else if files.is_empty() {
                orchestrator.import_source(&policy, &ConsoleProgress)?
            } else {
                orchestrator.import_batch(files, &policy, &ConsoleProgress)
            };

            if *json {
                print_json(&report.results)?;
            }

            match report.error {
                Some(err) => Err(err.into()),
                None => Ok(ExitCode::SUCCESS),
            }
        }

        Commands::Thumbnail { files, jobs } => {
            let cache = thumbnail_cache(cli)?;
            let mut missing = 0;
            for result in prefetch_thumbnails(&cache, files, *jobs) {
                match result {
                    Ok(record) if record.exists => println!("{}", record.cache_path.display()),
                    Ok(record) => {
                        missing += 1;
                        println!("{}\t(no thumbnail)", record.source_path.display());
                    }
                    Err(e) => {
                        missing += 1;
                        error!("{}", e);
                    }
                }
            }
            Ok(if missing == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::ShowThumbnail { path } => {
            let cache = thumbnail_cache(cli)?;
            println!("{}", cache.read_data_uri(path)?);
            Ok(ExitCode::SUCCESS)
        }

        Commands::ClearCache => {
            let root = cache_root(cli)?;
            // Clearing never runs the metadata tool, so skip tool discovery
            let cache =
                ThumbnailCache::new(&root, Arc::new(SystemProcessRunner::new()), "exiftool");
            cache.clear()?;
            println!("Cleared {}", root.display());
            Ok(ExitCode::SUCCESS)
        }

        Commands::CheckTools => {
            let mut ok = true;
            match ToolPaths::discover() {
                Ok(tools) => {
                    println!("exiftool:       {}", tools.exiftool().display());
                    if tools.is_converter_available() {
                        println!("DNG converter:  {}", tools.dng_converter().display());
                    } else {
                        println!(
                            "DNG converter:  not found ({})",
                            tools.dng_converter().display()
                        );
                    }
                }
                Err(e) => {
                    ok = false;
                    println!("exiftool:       {}", e);
                }
            }
            Ok(if ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::ShowSettings => {
            let store = settings_store(cli)?;
            let policy = load_policy(&store)?;
            println!("Settings directory: {}", store.directory().display());
            println!("{:#?}", policy);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
