use std::fmt::Write;

use crate::{
    error::EncodeError,
    formats::{
        SubtitleFormat,
        time::{TimestampStyle, format_timestamp},
    },
    model::Timeline,
};

/// Readable transcript: one `[start] text` line per cue, no end times.
pub fn write_txt(t: &Timeline) -> Result<String, EncodeError> {
    let mut out = String::new();

    for seg in t {
        writeln!(
            out,
            "[{}] {}",
            format_timestamp(seg.start, TimestampStyle::Srt),
            seg.text
        )
        .map_err(EncodeError::tagged(SubtitleFormat::Txt))?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Segment;

    #[test]
    fn start_only_lines() {
        let t = Timeline::new(vec![
            Segment::new(12.5, 15.2, "Ahh~"),
            Segment::new(61.0, 62.0, "next"),
        ]);
        assert_eq!(
            write_txt(&t).unwrap(),
            "[00:00:12,500] Ahh~\n[00:01:01,000] next\n"
        );
    }
}
