pub mod ass;
pub mod srt;
pub mod time;
pub mod txt;
pub mod vtt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{error::EncodeError, model::Timeline};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    Srt,
    Vtt,
    Txt,
    Ass,
}

impl SubtitleFormat {
    /// Every format, in export order.
    pub const ALL: [SubtitleFormat; 4] = [
        SubtitleFormat::Srt,
        SubtitleFormat::Vtt,
        SubtitleFormat::Txt,
        SubtitleFormat::Ass,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "SRT",
            SubtitleFormat::Vtt => "VTT",
            SubtitleFormat::Txt => "TXT",
            SubtitleFormat::Ass => "ASS",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Vtt => "vtt",
            SubtitleFormat::Txt => "txt",
            SubtitleFormat::Ass => "ass",
        }
    }

    pub fn mime(self) -> &'static str {
        "text/plain"
    }

    pub fn encode(self, t: &Timeline) -> Result<String, EncodeError> {
        match self {
            SubtitleFormat::Srt => srt::write_srt(t),
            SubtitleFormat::Vtt => vtt::write_vtt(t),
            SubtitleFormat::Txt => txt::write_txt(t),
            SubtitleFormat::Ass => ass::write_ass(t),
        }
    }
}

impl std::fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
