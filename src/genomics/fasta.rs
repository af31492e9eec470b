use anyhow::{anyhow, Result};
use std::io::Write;

use crate::config::FastaConfig;

/// Write a consensus as a single FASTA record wrapped at `config.line_width`.
///
/// An empty sequence produces the header line only.
pub fn write_fasta<W: Write>(
    writer: &mut W,
    header: &str,
    sequence: &str,
    config: &FastaConfig,
) -> Result<()> {
    if config.line_width == 0 {
        return Err(anyhow!("FASTA line width must be > 0"));
    }

    writeln!(writer, ">{header}")?;
    for line in sequence.as_bytes().chunks(config.line_width) {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Render a consensus FASTA record into a string (useful for tests and snapshots).
pub fn render_fasta(header: &str, sequence: &str, config: &FastaConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_fasta(&mut buffer, header, sequence, config)?;
    String::from_utf8(buffer).map_err(|_| anyhow!("rendered FASTA is not valid UTF-8"))
}
