use anyhow::{Result, anyhow};

/// Returned for negative or non-finite input, whatever the style.
pub const SENTINEL: &str = "00:00:00,000";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimestampStyle {
    Srt,
    Vtt,
    Ass,
}

/// A non-negative time split into clock fields. Hours are not wrapped at 24.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Timestamp {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub millis: u64,
}

impl Timestamp {
    pub fn from_seconds(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }

        let floor = value.floor();
        let mut whole = floor as u64;
        let mut millis = ((value - floor) * 1000.0).round() as u64;
        if millis >= 1000 {
            whole = whole.saturating_add(1);
            millis = 0;
        }

        let seconds = whole % 60;
        let total_minutes = whole / 60;
        let minutes = total_minutes % 60;
        let hours = total_minutes / 60;

        Some(Self {
            hours,
            minutes,
            seconds,
            millis,
        })
    }

    pub fn render(&self, style: TimestampStyle) -> String {
        let Self {
            hours,
            minutes,
            seconds,
            millis,
        } = *self;
        match style {
            TimestampStyle::Srt => format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}"),
            TimestampStyle::Vtt => format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}"),
            TimestampStyle::Ass => {
                let centis = millis / 10;
                format!("{hours}:{minutes:02}:{seconds:02}.{centis:02}")
            }
        }
    }
}

/// Seconds to a style-specific timestamp. Never fails: bad input yields
/// [`SENTINEL`] so one broken cue cannot stop the rest of a document.
pub fn format_timestamp(seconds: f64, style: TimestampStyle) -> String {
    match Timestamp::from_seconds(seconds) {
        Some(ts) => ts.render(style),
        None => {
            tracing::debug!(seconds, ?style, "invalid time, using sentinel");
            SENTINEL.to_string()
        }
    }
}

/// Parse `HH:MM:SS,mmm`, `HH:MM:SS.mmm` or a plain number into seconds.
pub fn parse_clock_seconds(s: &str) -> Result<f64> {
    let t = s.trim();

    if let Ok(v) = t.parse::<f64>() {
        return Ok(v);
    }

    let (hms, frac) = if let Some((a, b)) = t.split_once(',') {
        (a, Some(b))
    } else if let Some((a, b)) = t.split_once('.') {
        (a, Some(b))
    } else {
        (t, None)
    };

    let parts: Vec<&str> = hms.split(':').collect();
    let (h, m, sec) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => ("0", *m, *s),
        _ => return Err(anyhow!("unrecognized timestamp: '{t}'")),
    };

    let h: u64 = h.parse().map_err(|_| anyhow!("bad hours: '{t}'"))?;
    let m: u64 = m.parse().map_err(|_| anyhow!("bad minutes: '{t}'"))?;
    let sec: u64 = sec.parse().map_err(|_| anyhow!("bad seconds: '{t}'"))?;

    let mut total = (h as f64 * 60.0 + m as f64) * 60.0 + sec as f64;

    if let Some(frac) = frac {
        let mut frac_s: String = frac.trim().chars().take(3).collect();
        while frac_s.len() < 3 {
            frac_s.push('0');
        }
        let millis: u64 = frac_s
            .parse()
            .map_err(|_| anyhow!("bad milliseconds: '{t}'"))?;
        total += millis as f64 / 1000.0;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn srt(s: f64) -> String {
        format_timestamp(s, TimestampStyle::Srt)
    }

    #[test]
    fn srt_shape() {
        assert_eq!(srt(0.0), "00:00:00,000");
        assert_eq!(srt(12.5), "00:00:12,500");
        assert_eq!(srt(15.2), "00:00:15,200");
        assert_eq!(srt(65.123), "00:01:05,123");
        assert_eq!(srt(3661.5), "01:01:01,500");
    }

    #[test]
    fn vtt_uses_period() {
        assert_eq!(format_timestamp(12.5, TimestampStyle::Vtt), "00:00:12.500");
        assert_eq!(format_timestamp(3661.123, TimestampStyle::Vtt), "01:01:01.123");
    }

    #[test]
    fn ass_uses_unpadded_hours_and_centis() {
        assert_eq!(format_timestamp(12.5, TimestampStyle::Ass), "0:00:12.50");
        assert_eq!(format_timestamp(15.2, TimestampStyle::Ass), "0:00:15.20");
        assert_eq!(format_timestamp(36_000.0, TimestampStyle::Ass), "10:00:00.00");
        // 0.129 -> 129 ms -> 12 cs, truncated not rounded
        assert_eq!(format_timestamp(1.129, TimestampStyle::Ass), "0:00:01.12");
    }

    #[test]
    fn hours_are_not_wrapped() {
        assert_eq!(srt(100.0 * 3600.0), "100:00:00,000");
        assert_eq!(srt(25.0 * 3600.0 + 1.0), "25:00:01,000");
    }

    #[test]
    fn rounding_carries_into_seconds() {
        assert_eq!(srt(59.9996), "00:01:00,000");
        assert_eq!(srt(3599.9999), "01:00:00,000");
        assert_eq!(srt(1.0004), "00:00:01,000");
        assert_eq!(srt(1.0006), "00:00:01,001");
    }

    #[test]
    fn invalid_input_yields_sentinel() {
        for bad in [-0.001, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(srt(bad), SENTINEL);
            assert_eq!(format_timestamp(bad, TimestampStyle::Vtt), SENTINEL);
            assert_eq!(format_timestamp(bad, TimestampStyle::Ass), SENTINEL);
        }
    }

    #[test]
    fn srt_matches_shape_and_millis_rule() {
        let mut t = 0.0;
        while t < 7300.0 {
            let out = srt(t);
            let bytes = out.as_bytes();
            assert_eq!(out.len(), 12, "{out}");
            for (i, b) in bytes.iter().enumerate() {
                match i {
                    2 | 5 => assert_eq!(*b, b':'),
                    8 => assert_eq!(*b, b','),
                    _ => assert!(b.is_ascii_digit(), "{out}"),
                }
            }
            let expected_ms = (((t - t.floor()) * 1000.0).round() as u64) % 1000;
            assert_eq!(out[9..].parse::<u64>().unwrap(), expected_ms, "{t}");
            t += 0.377;
        }
    }

    #[test]
    fn parses_clock_strings() {
        assert_eq!(parse_clock_seconds("00:00:12,500").unwrap(), 12.5);
        assert_eq!(parse_clock_seconds("01:00:00.250").unwrap(), 3600.25);
        assert_eq!(parse_clock_seconds("01:05").unwrap(), 65.0);
        assert_eq!(parse_clock_seconds(" 7.25 ").unwrap(), 7.25);
        assert!(parse_clock_seconds("soon").is_err());
        assert!(parse_clock_seconds("1:2:3:4").is_err());
    }
}
