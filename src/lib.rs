//! Turns the timed-text payload returned by an AI transcription service into
//! SRT, VTT, TXT and ASS documents.
//!
//! The payload is untrusted: it may be fenced in markdown, miss fields or be
//! cut off mid-record. [`export::process`] always yields something to deliver,
//! either the four documents or the sanitized payload as a salvage file.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod formats;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod sanitize;

pub use error::{DecodeFailure, DecodeReason, EncodeError};
pub use export::{Artifact, ExportSet, Outcome, Salvage, export, export_parallel, process};
pub use formats::{
    SubtitleFormat,
    time::{Timestamp, TimestampStyle, format_timestamp},
};
pub use ingest::{RawRecord, ingest};
pub use model::{Segment, Timeline};
pub use sanitize::sanitize;
