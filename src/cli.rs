//! Command line front-end for the `pwdgen` binary.
//!
//! Flags become the caller override layer; the core does the rest.

use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::{
    detailed_rating, generate_batch, is_shell_sensitive, resolve, validate_with, ConfigError,
    ConfigOverrides, Configuration, GenerationError, LengthRule, RatingResult,
};

#[derive(Debug, Parser)]
#[command(
    name = "pwdgen",
    version,
    about = "Generate, validate and rate passwords"
)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Caller overrides; each flag wins over the matching `PWDGEN_*` variable.
#[derive(Debug, Default, Args)]
pub struct ConfigArgs {
    #[arg(short, long, global = true)]
    pub length: Option<usize>,
    #[arg(long, global = true)]
    pub minlen: Option<usize>,
    #[arg(long, global = true)]
    pub maxlen: Option<usize>,
    /// Minimum uppercase letters
    #[arg(long, global = true)]
    pub minuchars: Option<usize>,
    /// Minimum lowercase letters
    #[arg(long, global = true)]
    pub minlchars: Option<usize>,
    /// Minimum digits
    #[arg(long, global = true)]
    pub minnumbers: Option<usize>,
    /// Minimum special characters
    #[arg(long, global = true)]
    pub minschars: Option<usize>,
}

impl From<&ConfigArgs> for ConfigOverrides {
    fn from(args: &ConfigArgs) -> Self {
        ConfigOverrides {
            length: args.length,
            minlen: args.minlen,
            maxlen: args.maxlen,
            minuchars: args.minuchars,
            minlchars: args.minlchars,
            minnumbers: args.minnumbers,
            minschars: args.minschars,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate passwords (default)
    Generate {
        /// Number of passwords
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Print strength, entropy and crack time after each password
        #[arg(short, long, default_value_t = false)]
        rate: bool,
    },
    /// Check a password against the configuration (read from stdin if omitted)
    Validate {
        password: Option<String>,
        /// Require exactly --length characters instead of [minlen, maxlen]
        #[arg(long, default_value_t = false)]
        exact: bool,
    },
    /// Rate a password (read from stdin if omitted)
    Rate { password: Option<String> },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("failed to read or write: {0}")]
    Io(#[from] std::io::Error),
    #[error("no password given on the command line or stdin")]
    MissingPassword,
}

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The password checked by `validate` did not meet the configuration.
    Invalid,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Invalid => ExitCode::FAILURE,
        }
    }
}

/// Runs the parsed command, writing results to `out`.
pub fn run<W: Write, R: BufRead>(cli: &Cli, out: &mut W, input: R) -> Result<Outcome, CliError> {
    let overrides = ConfigOverrides::from(&cli.config);
    let config = resolve(Some(&overrides))?;

    match &cli.command {
        None => generate(&config, 1, false, out),
        Some(Commands::Generate { count, rate }) => generate(&config, *count, *rate, out),
        Some(Commands::Validate { password, exact }) => {
            let password = password_arg(password.as_deref(), input)?;
            let rule = if *exact { LengthRule::Exact } else { LengthRule::Bounds };
            let result = validate_with(&password, &config, rule)?;
            if result.valid {
                writeln!(out, "valid")?;
                return Ok(Outcome::Success);
            }
            writeln!(out, "invalid")?;
            for violation in &result.violations {
                writeln!(out, "  - {}", violation)?;
            }
            Ok(Outcome::Invalid)
        }
        Some(Commands::Rate { password }) => {
            let password = password_arg(password.as_deref(), input)?;
            write_rating(out, &detailed_rating(&password))?;
            Ok(Outcome::Success)
        }
    }
}

fn generate<W: Write>(
    config: &Configuration,
    count: usize,
    rate: bool,
    out: &mut W,
) -> Result<Outcome, CliError> {
    for password in generate_batch(config, count)? {
        let pwd = password.expose_secret();
        if pwd.chars().any(is_shell_sensitive) {
            tracing::warn!("password contains shell-sensitive characters; quote it in scripts");
        }
        writeln!(out, "{}", pwd)?;
        if rate {
            let rating = detailed_rating(&password);
            writeln!(
                out,
                "  {} | {:.1} bits | crack time: {}",
                rating.strength, rating.entropy, rating.crack_time_formatted
            )?;
        }
    }
    Ok(Outcome::Success)
}

fn write_rating<W: Write>(out: &mut W, rating: &RatingResult) -> std::io::Result<()> {
    let classes: Vec<&str> = rating.classes.iter().map(|c| c.name()).collect();
    writeln!(out, "strength: {}", rating.strength)?;
    writeln!(out, "entropy: {:.1} bits", rating.entropy)?;
    writeln!(
        out,
        "character set: {} ({})",
        rating.character_set_size,
        classes.join(", ")
    )?;
    writeln!(out, "length: {}", rating.length)?;
    writeln!(out, "crack time: {}", rating.crack_time_formatted)
}

/// Takes the password from the argument, or the first line of `input`.
fn password_arg<R: BufRead>(arg: Option<&str>, mut input: R) -> Result<SecretString, CliError> {
    if let Some(password) = arg {
        return Ok(SecretString::new(password.into()));
    }

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CliError::MissingPassword);
    }
    let password = line.trim_end_matches(['\r', '\n']);
    let secret = SecretString::new(password.into());
    zeroize::Zeroize::zeroize(&mut line);
    Ok(secret)
}
