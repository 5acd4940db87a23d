use std::fmt::Write;

use crate::{
    error::EncodeError,
    formats::{
        SubtitleFormat,
        time::{TimestampStyle, format_timestamp},
    },
    model::Timeline,
};

pub const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

/// Arial 20, white fill, black outline 2 and shadow 2, bottom-centre, 10px margins.
pub const DEFAULT_STYLE: &str = "Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,2,2,10,10,10,1";

pub const EVENTS_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

pub const ASS_HEADER: &str = "[Script Info]
Title: Generated Subtitles
ScriptType: v4.00+
WrapStyle: 0
ScaledBorderAndShadow: yes
YCbCr Matrix: None

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,2,2,10,10,10,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
";

const LAYER: u32 = 0;
const STYLE_NAME: &str = "Default";

pub fn write_ass(t: &Timeline) -> Result<String, EncodeError> {
    let mut out = String::from(ASS_HEADER);

    for seg in t {
        writeln!(
            out,
            "Dialogue: {LAYER},{start},{end},{STYLE_NAME},,0,0,0,,{text}",
            start = format_timestamp(seg.start, TimestampStyle::Ass),
            end = format_timestamp(seg.end, TimestampStyle::Ass),
            text = seg.text,
        )
        .map_err(EncodeError::tagged(SubtitleFormat::Ass))?;
    }

    Ok(out)
}
