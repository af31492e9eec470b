//! External short-read alignment via a minimap2 subprocess.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::AlignerConfig;
use crate::genomics::{AlignmentSet, AlignmentSetError};

/// Errors surfaced by the external aligner.
#[derive(Debug, Error)]
pub enum AlignerError {
    /// The process could not be started.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        /// Executable that failed to start.
        program: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        /// Executable that failed.
        program: PathBuf,
        /// Exit status reported by the OS.
        status: ExitStatus,
        /// Captured standard error.
        stderr: String,
    },

    /// The process wrote non-UTF-8 SAM output.
    #[error("aligner output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Persisting the SAM text failed.
    #[error("failed to write SAM output to {path}: {source}")]
    Persist {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The SAM output could not be loaded.
    #[error("failed to load aligner output: {0}")]
    Load(#[from] AlignmentSetError),
}

/// Paired-end inputs for one alignment run.
#[derive(Debug, Clone)]
pub struct PairedReads {
    /// Reference FASTA.
    pub reference: PathBuf,
    /// First-of-pair FASTQ.
    pub read1: PathBuf,
    /// Second-of-pair FASTQ.
    pub read2: PathBuf,
}

/// Runs minimap2 and collects its SAM output.
#[derive(Debug, Clone, Default)]
pub struct Minimap2Runner {
    config: AlignerConfig,
}

impl Minimap2Runner {
    /// Create a runner from configuration.
    pub fn new(config: AlignerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    /// Build `<program> -a -x <preset> [-t N] [extra..] REF R1 R2`.
    pub fn command(&self, inputs: &PairedReads) -> Command {
        let mut command = Command::new(&self.config.program);
        command.arg("-a").arg("-x").arg(&self.config.preset);
        if let Some(threads) = self.config.threads {
            command.arg("-t").arg(threads.to_string());
        }
        command
            .args(&self.config.extra_args)
            .arg(&inputs.reference)
            .arg(&inputs.read1)
            .arg(&inputs.read2);
        command
    }

    /// Run the aligner and return its SAM text.
    pub fn run(&self, inputs: &PairedReads) -> Result<String, AlignerError> {
        let mut command = self.command(inputs);
        debug!(?command, "launching aligner");

        let output = command.output().map_err(|source| AlignerError::Spawn {
            program: self.config.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(AlignerError::Failed {
                program: self.config.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let sam = String::from_utf8(output.stdout)?;
        info!(bytes = sam.len(), "aligner finished");
        Ok(sam)
    }

    /// Run the aligner and load its output, optionally keeping a copy of the SAM text.
    pub fn align(
        &self,
        inputs: &PairedReads,
        sam_out: Option<&Path>,
    ) -> Result<AlignmentSet, AlignerError> {
        let sam = self.run(inputs)?;
        if let Some(path) = sam_out {
            fs::write(path, &sam).map_err(|source| AlignerError::Persist {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(AlignmentSet::from_lines(sam.lines())?)
    }
}
