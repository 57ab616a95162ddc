use fatsecret_export::{cli, errors};
use std::process::ExitCode;
use tracing::debug;

fn init_tracing() {
    // FATSECRET_EXPORT_LOG, then RUST_LOG, default `info`. Logs go to stderr so
    // CSV written to stdout stays clean.
    let log_env = std::env::var("FATSECRET_EXPORT_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
}

fn run() -> errors::AppResult<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| errors::AppError::IoError(e.to_string()))?;
    rt.block_on(cli::cli())
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "Export failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
