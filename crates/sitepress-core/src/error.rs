//! Error types and exit codes for sitepress
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (including runs with per-document failures)
//! - 2: Usage error (bad flags/args, handled by clap)
//! - 3: Data error (missing corpus root, missing upstream artifact)

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing corpus, missing artifact, bad front matter (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during pipeline operations
#[derive(Error, Debug)]
pub enum SitepressError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    Usage(String),

    // Data errors (exit code 3)
    #[error("corpus root not found: {path:?}")]
    CorpusRootNotFound { path: PathBuf },

    #[error("missing artifact {path:?}: run `sitepress {stage}` first")]
    MissingArtifact { path: PathBuf, stage: &'static str },

    #[error("invalid config {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("no front matter found in {path:?}")]
    MissingFrontMatter { path: PathBuf },

    // Generic failures (exit code 1)
    #[error("{failed} of {total} documents failed; see report above")]
    DocumentFailures { failed: usize, total: usize },

    #[error("site build failed with {status}")]
    BuildFailed { status: ExitStatus },

    #[error("failed to launch site generator `{bin}`: {source}")]
    BuildSpawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl SitepressError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SitepressError::Usage(_) => ExitCode::Usage,

            SitepressError::CorpusRootNotFound { .. }
            | SitepressError::MissingArtifact { .. }
            | SitepressError::InvalidConfig { .. }
            | SitepressError::MissingFrontMatter { .. } => ExitCode::Data,

            SitepressError::DocumentFailures { .. }
            | SitepressError::BuildFailed { .. }
            | SitepressError::BuildSpawn { .. }
            | SitepressError::Io(_)
            | SitepressError::Json(_)
            | SitepressError::Yaml(_)
            | SitepressError::Toml(_)
            | SitepressError::Other(_) => ExitCode::Failure,
        }
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, SitepressError>;
