//! Decoding of the sanitized payload into a [`Timeline`].
//!
//! Records go through [`RawRecord`] first; every per-field default is applied
//! in [`RawRecord::into_segment`] and nowhere else.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{DecodeFailure, DecodeReason},
    formats::time::parse_clock_seconds,
    model::{Segment, Timeline},
    sanitize::sanitize,
};

/// Keys a model may wrap the segment list under instead of returning a bare array.
const WRAPPER_KEYS: [&str; 3] = ["segments", "subtitles", "cues"];

/// A decoded record before defaults are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub start: Option<Value>,
    #[serde(default)]
    pub end: Option<Value>,
    #[serde(default)]
    pub text: Option<Value>,
}

impl RawRecord {
    /// Missing or unreadable times become `0.0`, missing text becomes `""`.
    pub fn into_segment(self, index: usize) -> Segment {
        let start = time_or_default(self.start.as_ref(), "start", index);
        let end = time_or_default(self.end.as_ref(), "end", index);
        let text = match self.text {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => {
                tracing::debug!(index, field = "text", "field defaulted");
                String::new()
            }
            Some(other) => other.to_string(),
        };
        Segment { start, end, text }
    }
}

fn time_or_default(value: Option<&Value>, field: &'static str, index: usize) -> f64 {
    let decoded = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_clock_seconds(s).ok(),
        _ => None,
    };
    decoded.unwrap_or_else(|| {
        tracing::debug!(index, field, raw = ?value, "field defaulted");
        0.0
    })
}

/// Sanitize and decode `text` into a timeline.
///
/// Fails only when the text is not a JSON segment list at all; the failure
/// carries the sanitized text for salvage.
pub fn ingest(text: &str) -> Result<Timeline, DecodeFailure> {
    let cleaned = sanitize(text);

    match decode_records(&cleaned) {
        Ok(records) => {
            let segments: Vec<Segment> = records
                .into_iter()
                .enumerate()
                .map(|(i, r)| r.into_segment(i))
                .collect();
            tracing::info!(segments = segments.len(), "payload decoded");
            Ok(Timeline::new(segments))
        }
        Err(reason) => {
            tracing::warn!(%reason, bytes = cleaned.len(), "payload not decodable");
            Err(DecodeFailure {
                salvage: cleaned,
                reason,
            })
        }
    }
}

fn decode_records(cleaned: &str) -> Result<Vec<RawRecord>, DecodeReason> {
    let v: Value = serde_json::from_str(cleaned)?;

    let items = match v {
        Value::Array(items) => items,
        Value::Object(mut obj) => WRAPPER_KEYS
            .iter()
            .find_map(|k| match obj.remove(*k) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| DecodeReason::Shape("object without a segment array".to_string()))?,
        other => {
            return Err(DecodeReason::Shape(format!(
                "expected an array of segments, found {}",
                json_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(DecodeReason::Shape(format!(
                    "record {i} is {}, not an object",
                    json_kind(&item)
                )));
            }
            Ok(serde_json::from_value::<RawRecord>(item)?)
        })
        .collect()
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
