//! Output and aligner configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Default number of residues per FASTA line.
pub const DEFAULT_LINE_WIDTH: usize = 60;
/// Header used when the best-covered reference is reported.
pub const BEST_CONSENSUS_HEADER: &str = "Best Consensus";

/// Errors raised by invalid configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A parameter was outside its accepted range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Formatting parameters for consensus FASTA output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaConfig {
    /// Residues per sequence line.
    pub line_width: usize,
    /// Explicit header text (without the leading `>`).
    pub header: Option<String>,
}

impl Default for FastaConfig {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            header: None,
        }
    }
}

impl FastaConfig {
    /// Set the line width; zero is rejected.
    pub fn with_line_width(mut self, line_width: usize) -> Result<Self, ConfigError> {
        if line_width == 0 {
            return Err(ConfigError::Invalid(
                "line width must be > 0".to_string(),
            ));
        }
        self.line_width = line_width;
        Ok(self)
    }

    /// Override the header text.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Header for a consensus of `rname`, or of the best-covered reference when `None`.
    pub fn header_for(&self, rname: Option<&str>) -> String {
        match (&self.header, rname) {
            (Some(header), _) => header.clone(),
            (None, Some(rname)) => format!("{rname}_consensus"),
            (None, None) => BEST_CONSENSUS_HEADER.to_string(),
        }
    }
}

/// Parameters for the external minimap2 process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignerConfig {
    /// Executable to invoke.
    pub program: PathBuf,
    /// Value passed to `-x`.
    pub preset: String,
    /// Worker threads (`-t`); minimap2's default when `None`.
    pub threads: Option<usize>,
    /// Additional arguments inserted before the positional inputs.
    pub extra_args: Vec<String>,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("minimap2"),
            preset: "sr".to_string(),
            threads: None,
            extra_args: Vec::new(),
        }
    }
}

impl AlignerConfig {
    /// Use a different executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a different preset; empty presets are rejected.
    pub fn with_preset(mut self, preset: impl Into<String>) -> Result<Self, ConfigError> {
        let preset = preset.into();
        if preset.trim().is_empty() {
            return Err(ConfigError::Invalid("preset must not be empty".to_string()));
        }
        self.preset = preset;
        Ok(self)
    }

    /// Set the worker thread count; zero is rejected.
    pub fn with_threads(mut self, threads: usize) -> Result<Self, ConfigError> {
        if threads == 0 {
            return Err(ConfigError::Invalid("threads must be > 0".to_string()));
        }
        self.threads = Some(threads);
        Ok(self)
    }

    /// Append extra command-line arguments.
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}
