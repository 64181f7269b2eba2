//! Askr CLI application entry point
//!
//! Runs a single prompt described on the command line and prints the answer
//! on stdout, so shell scripts can ask questions:
//!
//! ```bash
//! if [ "$(askr confirm 'Deploy?')" = "true" ]; then ./deploy.sh; fi
//! name=$(askr input "Name" --default guest)
//! askr --json checkbox "Toppings" cheese ham olives
//! ```
//!
//! The prompt is drawn on stderr and only the answer reaches stdout.
//! Skipped prompts print nothing (`null` with `--json`). Ctrl-c exits with
//! status 130 unless `--no-raise` is given.
//!
//! # Configuration
//!
//! User defaults are read from `~/.config/askr/config.toml` on Linux and may
//! be overridden with `ASKR_*` environment variables. Logging goes to stderr
//! and is controlled with `ASKR_LOG` (for example `ASKR_LOG=askr=debug`).

use askr::cli::{Cli, write_answer};
use askr::{PromptError, Result, config::AskrConfig};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status used when the user interrupts the prompt
const INTERRUPTED: u8 = 130;

/// Environment variable holding the log filter
const LOG_ENV: &str = "ASKR_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load configuration, run the prompt and print its answer
///
/// # Errors
/// Returns `PromptError` if the configuration or prompt arguments are
/// invalid, the prompt fails or is interrupted, or output fails.
fn run(cli: &Cli) -> Result<()> {
    let config = AskrConfig::load()?;
    let mut prompt = cli.prompt_builder(&config).build()?;

    let answer = if cli.run_async {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(prompt.execute_async())?
    } else {
        prompt.execute()?
    };

    tracing::debug!(status = ?prompt.status(), "prompt completed");
    write_answer(&mut io::stdout().lock(), answer.as_ref(), cli.json)?;
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(PromptError::KeyboardInterrupt) => ExitCode::from(INTERRUPTED),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
