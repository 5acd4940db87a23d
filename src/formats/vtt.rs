use std::fmt::Write;

use crate::{
    error::EncodeError,
    formats::{
        SubtitleFormat,
        time::{TimestampStyle, format_timestamp},
    },
    model::Timeline,
};

pub const VTT_HEADER: &str = "WEBVTT\n\n";

pub fn write_vtt(t: &Timeline) -> Result<String, EncodeError> {
    let mut out = String::from(VTT_HEADER);

    for seg in t {
        write!(
            out,
            "{} --> {}\n{}\n\n",
            format_timestamp(seg.start, TimestampStyle::Vtt),
            format_timestamp(seg.end, TimestampStyle::Vtt),
            seg.text
        )
        .map_err(EncodeError::tagged(SubtitleFormat::Vtt))?;
    }

    Ok(out)
}
