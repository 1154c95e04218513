use std::process::ExitCode;

use clap::Parser;
use pwd_generator::cli::{self, Cli};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args = Cli::parse();
    let stdout = std::io::stdout();

    match cli::run(&args, &mut stdout.lock(), std::io::stdin().lock()) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            tracing::debug!(error = ?err, "pwdgen command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
