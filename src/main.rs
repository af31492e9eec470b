use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use samvote::genomics::write_fasta;
use samvote::{AlignerConfig, AlignmentSet, FastaConfig, Minimap2Runner, PairedReads};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "samvote", about = "Majority-vote consensus sequences from SAM pileups")]
struct Cli {
    /// Emit debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a consensus from an existing SAM file.
    Consensus {
        /// SAM file to load.
        sam: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Align paired reads with minimap2, then build a consensus.
    Map {
        /// First-of-pair FASTQ.
        #[arg(short = '1', long)]
        read1: PathBuf,
        /// Second-of-pair FASTQ.
        #[arg(short = '2', long)]
        read2: PathBuf,
        /// Reference FASTA.
        #[arg(short, long = "ref")]
        reference: PathBuf,
        /// Keep a copy of the aligner's SAM output.
        #[arg(long)]
        sam_out: Option<PathBuf>,
        /// minimap2 executable.
        #[arg(long, default_value = "minimap2")]
        minimap2: PathBuf,
        /// minimap2 preset.
        #[arg(long, default_value = "sr")]
        preset: String,
        /// minimap2 worker threads.
        #[arg(long)]
        threads: Option<usize>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Reference to build the consensus for (default: best-covered reference).
    #[arg(short, long)]
    seq_name: Option<String>,
    /// Residues per FASTA line.
    #[arg(long, default_value_t = samvote::config::DEFAULT_LINE_WIDTH)]
    line_width: usize,
    /// Header text (default: `<seq_name>_consensus` or `Best Consensus`).
    #[arg(long)]
    header: Option<String>,
    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Consensus { sam, output } => run_consensus(sam, output)?,
        Commands::Map {
            read1,
            read2,
            reference,
            sam_out,
            minimap2,
            preset,
            threads,
            output,
        } => {
            let mut config = AlignerConfig::default()
                .with_program(minimap2)
                .with_preset(preset)?;
            if let Some(threads) = threads {
                config = config.with_threads(threads)?;
            }
            let inputs = PairedReads {
                reference,
                read1,
                read2,
            };
            run_map(Minimap2Runner::new(config), inputs, sam_out, output)?
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_consensus(sam_path: PathBuf, output: OutputArgs) -> Result<()> {
    let alignments = AlignmentSet::from_path(&sam_path)
        .with_context(|| format!("failed to load alignments from {}", sam_path.display()))?;
    emit_consensus(&alignments, output)
}

fn run_map(
    runner: Minimap2Runner,
    inputs: PairedReads,
    sam_out: Option<PathBuf>,
    output: OutputArgs,
) -> Result<()> {
    info!(
        reference = %inputs.reference.display(),
        read1 = %inputs.read1.display(),
        read2 = %inputs.read2.display(),
        "aligning reads"
    );
    let alignments = runner
        .align(&inputs, sam_out.as_deref())
        .context("alignment failed")?;
    emit_consensus(&alignments, output)
}

fn emit_consensus(alignments: &AlignmentSet, output: OutputArgs) -> Result<()> {
    let mut config = FastaConfig::default().with_line_width(output.line_width)?;
    if let Some(header) = output.header {
        config = config.with_header(header);
    }

    let sequence = match output.seq_name.as_deref() {
        Some(rname) => alignments
            .consensus(rname)
            .with_context(|| format!("failed to build consensus for {rname}"))?,
        None => alignments.best_consensus(),
    };
    let header = config.header_for(output.seq_name.as_deref());
    info!(header = %header, length = sequence.len(), "writing consensus");

    let mut writer: Box<dyn Write> = match &output.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("failed to create output file {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write_fasta(&mut writer, &header, &sequence, &config)
}
