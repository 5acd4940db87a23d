use std::fmt::Write;

use crate::{
    error::EncodeError,
    formats::{
        SubtitleFormat,
        time::{TimestampStyle, format_timestamp},
    },
    model::Timeline,
};

pub fn write_srt(t: &Timeline) -> Result<String, EncodeError> {
    let mut out = String::new();

    for (i, seg) in t.iter().enumerate() {
        write!(
            out,
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timestamp(seg.start, TimestampStyle::Srt),
            format_timestamp(seg.end, TimestampStyle::Srt),
            seg.text
        )
        .map_err(EncodeError::tagged(SubtitleFormat::Srt))?;
    }

    Ok(out)
}
