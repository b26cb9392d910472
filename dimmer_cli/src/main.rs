//! `dimmer` binary: config loading, logging setup, signal handling, and
//! subcommand dispatch.

mod cli;
mod error_fmt;
mod rt;
mod run;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use eyre::WrapErr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};

fn main() {
    let code = match real_main() {
        Ok(()) => 0,
        Err(err) => {
            if JSON_MODE.get().copied().unwrap_or(false) {
                eprintln!("{}", error_fmt::format_error_json(&err));
            } else {
                eprintln!("Error: {}", error_fmt::humanize(&err));
            }
            error_fmt::exit_code_for_error(&err)
        }
    };
    std::process::exit(code);
}

fn real_main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let text = std::fs::read_to_string(&cli.config)
        .wrap_err_with(|| format!("failed to read config {}", cli.config.display()))?;
    let cfg = dimmer_config::load_toml(&text)
        .wrap_err_with(|| format!("failed to parse config {}", cli.config.display()))?;
    cfg.validate()?;

    init_tracing(&cli, &cfg.logging);

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || shutdown.store(true, Ordering::Relaxed))
            .wrap_err("failed to install Ctrl-C handler")?;
    }

    match cli.cmd {
        Commands::Run {
            power,
            duration_s,
            rt,
            stats,
        } => run::run_fixed(&cfg, power, duration_s, rt, stats, shutdown),
        Commands::Demo { rt, stats } => run::run_demo(&cfg, rt, stats, shutdown),
        Commands::SelfCheck => run::self_check(&cfg),
    }
}

/// Console logging per CLI flags, plus an optional JSON-lines file sink per
/// the `[logging]` config section. The config level applies when the CLI
/// flag was left at its default.
fn init_tracing(cli: &Cli, logging: &dimmer_config::Logging) {
    let level = if cli.log_level == "info" {
        logging.level.as_deref().unwrap_or("info")
    } else {
        &cli.log_level
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_writer = logging.file.as_ref().map(|file| {
        let path = Path::new(file);
        let dir = path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .map_or_else(|| "dimmer.log".into(), std::ffi::OsStr::to_os_string);
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        writer
    });

    let registry = tracing_subscriber::registry().with(filter);
    match (cli.json, file_writer) {
        (true, Some(writer)) => registry
            .with(fmt::layer().json())
            .with(fmt::layer().json().with_writer(writer).with_ansi(false))
            .init(),
        (true, None) => registry.with(fmt::layer().json()).init(),
        (false, Some(writer)) => registry
            .with(fmt::layer())
            .with(fmt::layer().json().with_writer(writer).with_ansi(false))
            .init(),
        (false, None) => registry.with(fmt::layer()).init(),
    }
}
