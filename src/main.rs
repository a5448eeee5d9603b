//! Bigscreen Launcher binary
//!
//! The launcher window owns the main thread (required by the windowing
//! toolkit); the dispatcher and process I/O run on a Tokio runtime beside it.

use anyhow::{Context, Result};
use bigscreen_launcher::app::AppContext;
use bigscreen_launcher::config::LauncherConfig;
use bigscreen_launcher::input::gamepad::print_gamepad_diagnostics;
use bigscreen_launcher::paths::AppPaths;
use bigscreen_launcher::ui::{run_launcher_window, EguiWindows};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bigscreen Launcher - launch and control emulators from a gamepad
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults to the per-user data directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Do not create a system tray icon
    #[arg(long)]
    no_tray: bool,

    /// List connected gamepads and exit
    #[arg(long)]
    list_gamepads: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let paths = match &args.config {
        Some(config) => AppPaths::with_config(config),
        None => AppPaths::detect(),
    };
    paths.ensure_directories()?;

    let _log_guard = init_logging(&args.log_level, &paths.logs_dir)?;

    info!("Starting Bigscreen Launcher v{}...", env!("CARGO_PKG_VERSION"));
    let mode = if paths.is_override {
        "--config override"
    } else if paths.is_portable {
        "portable"
    } else {
        "installed"
    };
    info!("Data directory: {} ({})", paths.base_dir().display(), mode);

    if args.list_gamepads {
        return print_gamepad_diagnostics();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("launcher-rt")
        .build()
        .context("Failed to start Tokio runtime")?;

    let config = runtime.block_on(LauncherConfig::load_or_create(&paths.config))?;
    info!("Configuration file: {}", paths.config.display());

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let with_tray = config.tray.enabled && !args.no_tray;
    let windows = EguiWindows::new(true);
    let context = AppContext::start(&config, windows.clone(), with_tray, runtime.handle())?;

    let result = run_launcher_window(&config, windows, context.events(), with_tray);

    context.shutdown(runtime.handle());
    // Launched apps outlive us in their own session. Their output pipes close
    // with the reader tasks; they ignore SIGPIPE and just get EPIPE on write.
    runtime.shutdown_timeout(Duration::from_secs(1));

    info!("Bigscreen Launcher shutdown complete");
    result
}

fn init_logging(level: &str, logs_dir: &Path) -> Result<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let file_appender = tracing_appender::rolling::daily(logs_dir, "launcher.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}
