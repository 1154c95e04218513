//! Crate-level error type for callers that both resolve and generate.

use thiserror::Error;

use crate::config::ConfigError;
use crate::generator::GenerationError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
}
