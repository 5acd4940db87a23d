//! Runs every encoder over one timeline and labels the results for delivery.

use rayon::prelude::*;

use crate::{
    error::{DecodeFailure, EncodeError},
    formats::SubtitleFormat,
    ingest::ingest,
    model::Timeline,
};

pub const SALVAGE_EXTENSION: &str = "json";
pub const SALVAGE_MIME: &str = "application/json";

/// One rendered document.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub format: SubtitleFormat,
    pub document: String,
}

impl Artifact {
    pub fn label(&self) -> &'static str {
        self.format.label()
    }

    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }

    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension())
    }
}

/// Documents for every format, in [`SubtitleFormat::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSet {
    artifacts: Vec<Artifact>,
    failures: Vec<EncodeError>,
}

impl ExportSet {
    pub fn get(&self, format: SubtitleFormat) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.format == format)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Encoders that failed; their artifact holds an empty placeholder.
    pub fn failures(&self) -> &[EncodeError] {
        &self.failures
    }

    fn from_results(results: Vec<(SubtitleFormat, Result<String, EncodeError>)>) -> Self {
        let mut set = ExportSet::default();
        for (format, result) in results {
            let document = match result {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        format = format.label(),
                        "encoder failed, using placeholder"
                    );
                    set.failures.push(e);
                    String::new()
                }
            };
            set.artifacts.push(Artifact { format, document });
        }
        set
    }
}

impl<'a> IntoIterator for &'a ExportSet {
    type Item = &'a Artifact;
    type IntoIter = std::slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}

/// Render all four formats one after another.
pub fn export(t: &Timeline) -> ExportSet {
    let results = SubtitleFormat::ALL
        .iter()
        .map(|f| (*f, f.encode(t)))
        .collect();
    ExportSet::from_results(results)
}

/// Same output as [`export`], with encoders spread over the rayon pool.
pub fn export_parallel(t: &Timeline) -> ExportSet {
    let results = SubtitleFormat::ALL[..]
        .par_iter()
        .map(|f| (*f, f.encode(t)))
        .collect();
    ExportSet::from_results(results)
}

pub fn render(t: &Timeline, parallel: bool) -> ExportSet {
    let set = if parallel {
        export_parallel(t)
    } else {
        export(t)
    };
    tracing::info!(
        segments = t.len(),
        span_seconds = t.span_seconds(),
        documents = set.len(),
        "export complete"
    );
    set
}

/// Undecodable payload handed back to the operator as `<stem>.json`.
#[derive(Debug)]
pub struct Salvage {
    pub failure: DecodeFailure,
}

impl Salvage {
    /// The sanitized payload, exactly as it failed to decode.
    pub fn text(&self) -> &str {
        &self.failure.salvage
    }

    pub fn mime(&self) -> &'static str {
        SALVAGE_MIME
    }

    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{SALVAGE_EXTENSION}")
    }
}

impl From<DecodeFailure> for Salvage {
    fn from(failure: DecodeFailure) -> Self {
        Self { failure }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Exports(ExportSet),
    Salvage(Salvage),
}

/// Raw model output in, deliverable artifacts out. Never fails.
pub fn process(raw: &str, parallel: bool) -> Outcome {
    let span = tracing::info_span!("process", bytes = raw.len(), parallel);
    let _g = span.enter();

    match ingest(raw) {
        Ok(timeline) => Outcome::Exports(render(&timeline, parallel)),
        Err(failure) => Outcome::Salvage(failure.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Segment;

    fn sample() -> Timeline {
        Timeline::new(vec![
            Segment::new(12.5, 15.2, "Ahh~"),
            Segment::new(15.2, 18.75, "again, slower\nplease"),
            Segment::new(f64::NAN, 20.0, ""),
        ])
    }

    #[test]
    fn export_has_all_formats_in_order() {
        let set = export(&sample());
        let labels: Vec<&str> = set.iter().map(Artifact::label).collect();
        assert_eq!(labels, vec!["SRT", "VTT", "TXT", "ASS"]);
        assert!(set.failures().is_empty());
        assert_eq!(
            set.get(SubtitleFormat::Ass).unwrap().file_name("subtitles"),
            "subtitles.ass"
        );
    }

    #[test]
    fn parallel_matches_sequential() {
        let t = sample();
        let seq = export(&t);
        for _ in 0..8 {
            assert_eq!(export_parallel(&t), seq);
        }
    }

    #[test]
    fn encoders_in_any_order_give_same_documents() {
        let t = sample();
        let forward: Vec<String> = SubtitleFormat::ALL
            .iter()
            .map(|f| f.encode(&t).unwrap())
            .collect();
        let mut backward: Vec<String> = SubtitleFormat::ALL
            .iter()
            .rev()
            .map(|f| f.encode(&t).unwrap())
            .collect();
        backward.reverse();
        assert_eq!(forward, backward);

        let shared = &t;
        let threaded: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = SubtitleFormat::ALL
                .into_iter()
                .map(|f| s.spawn(move || f.encode(shared).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(forward, threaded);
    }

    #[test]
    fn empty_timeline_exports_headers_only() {
        let set = export(&Timeline::default());
        assert_eq!(set.get(SubtitleFormat::Srt).unwrap().document, "");
        assert_eq!(set.get(SubtitleFormat::Txt).unwrap().document, "");
        assert_eq!(set.get(SubtitleFormat::Vtt).unwrap().document, "WEBVTT\n\n");
        assert!(set.get(SubtitleFormat::Ass).unwrap().document.starts_with("[Script Info]"));
    }

    #[test]
    fn process_exports_valid_payload() {
        let raw = "```json\n[{\"start\":12.5,\"end\":15.2,\"text\":\"Ahh~\"}]\n```";
        match process(raw, false) {
            Outcome::Exports(set) => {
                assert_eq!(
                    set.get(SubtitleFormat::Srt).unwrap().document,
                    "1\n00:00:12,500 --> 00:00:15,200\nAhh~\n\n"
                );
            }
            Outcome::Salvage(s) => panic!("unexpected salvage: {}", s.failure),
        }
    }

    #[test]
    fn process_salvages_truncated_payload() {
        let raw = r#"[{"start":1,"end":2,"text":"x"},{"start":0"#;
        match process(raw, true) {
            Outcome::Salvage(s) => {
                assert_eq!(s.text(), raw);
                assert_eq!(s.mime(), "application/json");
                assert_eq!(s.file_name("subtitles"), "subtitles.json");
            }
            Outcome::Exports(_) => panic!("truncated payload should not export"),
        }
    }

    #[test]
    fn failed_encoder_becomes_placeholder() {
        let err = EncodeError {
            format: SubtitleFormat::Vtt,
            source: std::fmt::Error,
        };
        let set = ExportSet::from_results(vec![
            (SubtitleFormat::Srt, Ok("doc".to_string())),
            (SubtitleFormat::Vtt, Err(err)),
        ]);
        assert_eq!(set.get(SubtitleFormat::Vtt).unwrap().document, "");
        assert_eq!(set.failures(), &[err]);
        assert_eq!(set.get(SubtitleFormat::Srt).unwrap().document, "doc");
    }
}
