//! CLI host adapter for the hx extensions.
//!
//! Stands in for the mobile shell: it supplies storage state and directory
//! layout from flags or a config file, then routes messages to extensions
//! using either calling convention.
//!
//! # Usage
//!
//! ```bash
//! hx-host [OPTIONS] <COMMAND>
//!
//! # Request/response call
//! hx-host --storage-root /sdcard request audioFileLister list-files
//!
//! # Fire-and-forget call; prints "<instance>\t<delivered message>"
//! hx-host send echo hi --instance 7
//!
//! # Line-delimited JSON loop on stdin/stdout
//! hx-host serve < requests.jsonl
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod serve;

use std::io::Write;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use hx_core::{Config, InstanceId, StorageState};
use hx_extensions::{ChannelSink, ExtensionRegistry, MessageSink};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Host adapter that routes string messages to native extensions.
#[derive(Parser)]
#[command(name = "hx-host", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file.
    #[arg(short, long, global = true, env = "HX_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Root of the external storage medium.
    ///
    /// Defaults to the config file value, or the working directory.
    #[arg(long, global = true, env = "HX_STORAGE_ROOT")]
    storage_root: Option<Utf8PathBuf>,

    /// Report this mount state instead of probing the storage root
    /// (e.g. `mounted`, `mounted_ro`, `unmounted`).
    #[arg(long, global = true, env = "HX_STORAGE_STATE")]
    storage_state: Option<StorageState>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Call an extension and print its inline reply.
    Request(CallArgs),

    /// Call an extension fire-and-forget and print what it delivers.
    Send(CallArgs),

    /// List registered extensions.
    List,

    /// Read JSON requests from stdin, write JSON outcomes to stdout.
    Serve,
}

/// Arguments shared by `request` and `send`.
#[derive(clap::Args)]
struct CallArgs {
    /// Registered extension name.
    extension: String,

    /// Message payload.
    #[arg(allow_hyphen_values = true)]
    message: String,

    /// Caller instance id.
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    instance: i32,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects `RUST_LOG` if set; otherwise `debug` with `--verbose`, `info`
/// by default. Logs go to stderr so stdout carries only replies.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},lofty=warn"))
    });

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

/// Builds a [`Config`] from the config file and CLI overrides.
///
/// Flags win over file values. An empty storage root becomes `.`.
///
/// # Errors
///
/// Returns an error if the config file can't be loaded or the merged
/// configuration is invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config {}: {}", path, e))?,
        None => Config::default(),
    };

    if let Some(root) = &cli.storage_root {
        config.storage.root.clone_from(root);
    }
    if config.storage.root.as_str().is_empty() {
        config.storage.root = Utf8PathBuf::from(".");
    }
    if cli.storage_state.is_some() {
        config.storage.state = cli.storage_state;
    }

    config.validate()?;
    Ok(config)
}

fn build_registry(
    config: &Config,
    sink: Arc<dyn MessageSink>,
) -> color_eyre::Result<ExtensionRegistry> {
    ExtensionRegistry::with_defaults(config, sink)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to set up extensions: {}", e))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Prints the inline reply of a request/response call.
fn run_request(config: &Config, args: &CallArgs) -> color_eyre::Result<()> {
    let (sink, _posts) = ChannelSink::channel();
    let registry = build_registry(config, Arc::new(sink))?;
    let endpoint = registry.endpoint(&args.extension)?;

    let reply = endpoint.request(InstanceId::new(args.instance), &args.message);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{reply}")?;
    Ok(())
}

/// Prints every delivery produced by a fire-and-forget call.
fn run_send(config: &Config, args: &CallArgs) -> color_eyre::Result<()> {
    let (sink, mut posts) = ChannelSink::channel();
    let registry = build_registry(config, Arc::new(sink))?;
    let endpoint = registry.endpoint(&args.extension)?;

    endpoint.send(InstanceId::new(args.instance), &args.message);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    while let Ok(posted) = posts.try_recv() {
        writeln!(handle, "{}\t{}", posted.instance, posted.message)?;
    }
    Ok(())
}

/// Prints registered extension names, one per line.
fn run_list(config: &Config) -> color_eyre::Result<()> {
    let (sink, _posts) = ChannelSink::channel();
    let registry = build_registry(config, Arc::new(sink))?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    for name in registry.names() {
        writeln!(handle, "{name}")?;
    }
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Merge config file and flags
    let config = build_config(&cli)?;
    info!(
        root = %config.storage.root,
        state = ?config.storage.state,
        "Storage configured"
    );

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Request(args) => run_request(&config, args),
        Commands::Send(args) => run_send(&config, args),
        Commands::List => run_list(&config),
        Commands::Serve => serve::run_serve(&config).await,
    }
}
