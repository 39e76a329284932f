//! CLI entry point for the repo-ctx tool.
//!
//! This binary scans a repository and assembles the source files that match
//! a set of extensions into one context blob, for pasting into a prompt or
//! saving alongside a review.
//!
//! # Usage
//!
//! ```bash
//! repo-ctx [OPTIONS]
//!
//! # Scan the current directory and show a summary
//! repo-ctx
//!
//! # Go and SQL only, written to a file
//! repo-ctx --dir ./service -e .go -e sql --output context.txt
//!
//! # Print the context and a JSON summary
//! repo-ctx --print --json
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod context;

use std::io::Write;
use std::time::Instant;

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::WrapErr;
use ctx_core::{Config, ScanSettings};
use ctx_scanner::{default_worker_count, ConcurrentWalker, ScanConfig, ScanError, StatsSnapshot};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::context::{summary_line, ContextBuilder, ScanSummary};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Assemble a repository's source files into a single context blob.
///
/// Walks DIR, skips `.git` and `node_modules`, drops files matching the
/// ignore-file's globs, and loads every file with an allowed extension.
#[derive(Debug, Parser)]
#[command(name = "repo-ctx", version, about, long_about = None)]
struct Cli {
    /// Directory to analyze.
    ///
    /// Defaults to the current directory.
    #[arg(short, long, env = "REPO_CTX_DIR")]
    dir: Option<Utf8PathBuf>,

    /// Ignore-file with one glob per line, matched against file names.
    ///
    /// Relative paths resolve against DIR. Defaults to `.gitignore`.
    #[arg(long, value_name = "PATH")]
    ignore_file: Option<Utf8PathBuf>,

    /// Allowed file extension (repeatable). A missing leading dot is added.
    ///
    /// Defaults to .svelte .ts .go .html .sql.
    #[arg(short, long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Number of reader threads.
    ///
    /// Defaults to the host's available parallelism.
    #[arg(short = 'j', long, value_name = "N")]
    workers: Option<usize>,

    /// Follow symbolic links while walking.
    #[arg(long)]
    follow_links: bool,

    /// JSON settings file. Command-line flags override its values.
    #[arg(short, long, value_name = "PATH", env = "REPO_CTX_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Write the assembled context to this file.
    #[arg(short, long, value_name = "PATH")]
    output: Option<Utf8PathBuf>,

    /// Print the assembled context to stdout.
    #[arg(long)]
    print: bool,

    /// Print the scan summary as JSON.
    #[arg(long)]
    json: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
/// Logs go to stderr so stdout stays clean for `--print` and `--json`.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},globset=warn,ignore=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Prepends a dot to an extension given without one.
fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_owned()
    } else {
        format!(".{ext}")
    }
}

/// Builds [`ScanSettings`] from the settings file and CLI arguments.
///
/// Precedence: command-line flag, then settings file, then built-in default.
///
/// # Errors
///
/// Returns an error if the settings file cannot be loaded or the merged
/// settings are invalid.
fn build_settings(cli: &Cli) -> color_eyre::Result<ScanSettings> {
    let mut settings = match &cli.config {
        Some(path) => {
            Config::load(path)
                .wrap_err_with(|| format!("Failed to load settings from {path}"))?
                .scan
        }
        None => ScanSettings::default(),
    };

    if let Some(dir) = &cli.dir {
        settings.root.clone_from(dir);
    }
    if let Some(ignore_file) = &cli.ignore_file {
        settings.ignore_file.clone_from(ignore_file);
    }
    if !cli.extensions.is_empty() {
        settings.extensions = cli
            .extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .collect();
    }
    if cli.workers.is_some() {
        settings.workers = cli.workers;
    }
    if cli.follow_links {
        settings.follow_links = true;
    }

    settings.validate()?;
    Ok(settings)
}

// =============================================================================
// COMMAND IMPLEMENTATION
// =============================================================================

/// Scans into `builder`, keeping what was delivered if the walk stops early.
///
/// A directory that cannot be enumerated ends the walk but not the run.
///
/// # Errors
///
/// Returns an error for configuration, spawn, and worker panic failures.
fn scan_into(
    walker: &ConcurrentWalker,
    workers: usize,
    builder: &ContextBuilder,
) -> color_eyre::Result<StatsSnapshot> {
    match walker.scan(workers, builder) {
        Ok(stats) => Ok(stats),
        Err(err @ ScanError::Walk(_)) => {
            warn!(
                error = %err,
                delivered = builder.file_count(),
                "Walk stopped early, keeping partial context"
            );
            Ok(walker.stats())
        }
        Err(err) => {
            Err(err).wrap_err_with(|| format!("Failed to scan {}", walker.config().root))
        }
    }
}

/// Runs one scan and emits the context and summary.
///
/// # Errors
///
/// Returns an error if the scan fails or output cannot be written.
fn run(cli: &Cli, settings: &ScanSettings) -> color_eyre::Result<()> {
    let workers = settings.workers.unwrap_or_else(default_worker_count);
    let ignore_file = settings.ignore_file_path();
    debug!(ignore_file = %ignore_file, exists = ignore_file.exists(), "Resolved ignore-file");

    let walker = ConcurrentWalker::new(ScanConfig::from_settings(settings));
    let builder = ContextBuilder::new();

    let start = Instant::now();
    let stats = scan_into(&walker, workers, &builder)?;
    let elapsed = start.elapsed();

    let files = builder.file_count();
    let bytes = builder.byte_count();
    let context = builder.render(&settings.root);

    if let Some(output) = &cli.output {
        std::fs::write(output, &context)
            .wrap_err_with(|| format!("Failed to write context to {output}"))?;
        info!(path = %output, bytes = context.len(), "Context written");
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    if cli.print {
        write!(handle, "{context}")?;
    }

    if cli.json {
        let summary = ScanSummary {
            root: settings.root.clone(),
            files,
            bytes,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            output: cli.output.clone(),
            stats,
        };
        let json = serde_json::to_string_pretty(&summary)
            .wrap_err("Failed to serialize summary")?;
        writeln!(handle, "{json}")?;
    } else if cli.print {
        // Keep stdout to the context itself
        let stderr = std::io::stderr();
        writeln!(stderr.lock(), "{}", summary_line(files, elapsed))?;
    } else {
        writeln!(handle, "{}", summary_line(files, elapsed))?;
    }

    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Merge settings file and flags
    let settings = build_settings(&cli)?;

    run(&cli, &settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("repo-ctx").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension(".go"), ".go");
        assert_eq!(normalize_extension("go"), ".go");
        assert_eq!(normalize_extension(" sql "), ".sql");
    }

    #[test]
    fn test_build_settings_defaults() {
        let settings = build_settings(&parse(&[])).unwrap();
        assert_eq!(settings, ScanSettings::default());
    }

    #[test]
    fn test_build_settings_flags() {
        let cli = parse(&[
            "--dir", "repo", "-e", "go", "-e", ".sql", "-j", "3", "--ignore-file", "ignore.txt",
        ]);
        let settings = build_settings(&cli).unwrap();

        assert_eq!(settings.root.as_str(), "repo");
        assert_eq!(settings.extensions, vec![".go", ".sql"]);
        assert_eq!(settings.workers, Some(3));
        assert_eq!(settings.ignore_file_path().as_str(), "repo/ignore.txt");
    }

    #[test]
    fn test_build_settings_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("settings.json")).unwrap();
        fs::write(
            &path,
            r#"{"scan": {"root": "from-file", "workers": 8, "extensions": [".ts"]}}"#,
        )
        .unwrap();

        let cli = parse(&["--config", path.as_str(), "--workers", "2"]);
        let settings = build_settings(&cli).unwrap();

        assert_eq!(settings.root.as_str(), "from-file");
        assert_eq!(settings.workers, Some(2));
        assert_eq!(settings.extensions, vec![".ts"]);
    }

    #[test]
    fn test_build_settings_rejects_zero_workers() {
        assert!(build_settings(&parse(&["-j", "0"])).is_err());
    }

    #[test]
    fn test_build_settings_missing_config_file() {
        let cli = parse(&["--config", "/nonexistent/repo-ctx.json"]);
        assert!(build_settings(&cli).is_err());
    }

    #[test]
    fn test_scan_into_rejects_zero_workers() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let walker = ConcurrentWalker::new(ScanConfig::new(&root));

        assert!(scan_into(&walker, 0, &ContextBuilder::new()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_into_keeps_partial_context_on_walk_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        fs::write(root.join("a.go"), "package a").unwrap();
        let locked = root.join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("b.go"), "package b").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the directory.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let walker = ConcurrentWalker::new(ScanConfig::new(&root).with_extensions([".go"]));
        let builder = ContextBuilder::new();
        let result = scan_into(&walker, 2, &builder);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let stats = result.unwrap();
        assert_eq!(stats.files_delivered, 1);
        assert_eq!(builder.file_count(), 1);
        let context = builder.render(&root);
        assert!(context.contains("a.go"));
        assert!(context.contains("package a"));
        assert!(!context.contains("package b"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
