//! gemini-smoke binary entry point.

use gemini_smoke::{app, config, GeminiClient};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // stdout carries only the answer or the missing-key line
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    config::load_env_file(config::ENV_FILE);

    let mut stdout = io::stdout();
    match app::run(|name| std::env::var(name).ok(), GeminiClient::new, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported on stdout by the run itself.
        Err(err) if err.is_missing_credential() => ExitCode::from(1),
        Err(err) => {
            tracing::debug!(error = ?err, "generation failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
