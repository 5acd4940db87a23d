use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::formats::SubtitleFormat;

#[derive(Debug, Parser)]
#[command(name = "subforge", version)]
#[command(about = "Turn a transcription model's JSON payload into SRT, VTT, TXT and ASS subtitles.")]
pub struct Args {
    /// Path to config TOML (defaults to ./config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render every subtitle format from a raw payload
    Export(ExportCmd),
    /// Print the effective default config as TOML and exit
    PrintDefaultConfig,
}

#[derive(Debug, Parser)]
pub struct ExportCmd {
    /// Payload file path, or '-' for stdin
    pub input: String,

    /// Directory the documents are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// File name stem (overrides export.file_stem)
    #[arg(long)]
    pub stem: Option<String>,

    /// Only write these formats (repeatable; overrides export.formats)
    #[arg(long = "format", value_enum)]
    pub formats: Vec<SubtitleFormat>,

    /// Print one format to stdout instead of writing files
    #[arg(long, value_enum)]
    pub stdout: Option<SubtitleFormat>,

    /// Allow overwriting existing output files
    #[arg(long)]
    pub overwrite: bool,

    /// Run the encoders in parallel (overrides export.parallel)
    #[arg(long)]
    pub parallel: bool,
}
