// crates/clipper-core/src/helpers/time.rs
//
// Timestamp formatting and parsing for the in/out fields.
//
// The UI works at one-second resolution: `format_ms` truncates, and
// `parse_hms` only ever yields whole seconds. Hours are unbounded so a
// position past 24 h still round-trips.

/// A parsed `HH:MM:SS` timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hms {
    pub hours:   u32,
    pub minutes: u8,
    pub seconds: u8,
}

impl Hms {
    pub fn total_secs(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    pub fn as_ms(&self) -> u64 {
        self.total_secs() * 1000
    }
}

/// Format a playback position in milliseconds as `HH:MM:SS`.
///
/// ```
/// use clipper_core::helpers::time::format_ms;
/// assert_eq!(format_ms(0),         "00:00:00");
/// assert_eq!(format_ms(90_000),    "00:01:30");
/// assert_eq!(format_ms(3_661_000), "01:01:01");
/// ```
pub fn format_ms(ms: u64) -> String {
    let total = ms / 1000;
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// Strictly parse `HH:MM:SS`.
///
/// Hours need at least two digits, minutes and seconds exactly two, all ASCII.
/// Minutes and seconds must be below 60. Anything else is `None`; no
/// best-effort guessing.
///
/// ```
/// use clipper_core::helpers::time::parse_hms;
/// assert_eq!(parse_hms("12:00:00").map(|t| t.hours), Some(12));
/// assert!(parse_hms("bad").is_none());
/// assert!(parse_hms("25:70:00").is_none());
/// ```
pub fn parse_hms(text: &str) -> Option<Hms> {
    let mut parts = text.split(':');
    let (h, m, s) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if h.len() < 2 || m.len() != 2 || s.len() != 2 {
        return None;
    }
    if ![h, m, s].iter().all(|p| p.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }

    let hours:   u32 = h.parse().ok()?;
    let minutes: u8  = m.parse().ok()?;
    let seconds: u8  = s.parse().ok()?;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    Some(Hms { hours, minutes, seconds })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_reference_values() {
        assert_eq!(format_ms(0), "00:00:00");
        assert_eq!(format_ms(3_661_000), "01:01:01");
        assert_eq!(format_ms(90_000), "00:01:30");
    }

    #[test]
    fn format_truncates_below_one_second() {
        assert_eq!(format_ms(999), "00:00:00");
        assert_eq!(format_ms(59_999), "00:00:59");
    }

    #[test]
    fn hours_are_not_capped() {
        assert_eq!(format_ms(100 * 3600 * 1000), "100:00:00");
        let t = parse_hms("100:00:00").unwrap();
        assert_eq!(t.total_secs(), 360_000);
    }

    #[test]
    fn round_trip_at_second_granularity() {
        for ms in [0, 1, 999, 1000, 59_999, 61_500, 3_599_999, 86_400_000, 90_061_234] {
            let parsed = parse_hms(&format_ms(ms)).unwrap();
            assert_eq!(parsed.total_secs(), ms / 1000, "ms = {ms}");
        }
    }

    #[test]
    fn parses_noon() {
        assert_eq!(parse_hms("12:00:00"), Some(Hms { hours: 12, minutes: 0, seconds: 0 }));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in [
            "bad", "", "12:00", "12:00:00:00", "1:00:00", "12:0:00", "12:00:0",
            "12:60:00", "12:00:60", "25:70:00", " 12:00:00", "12:00:00 ",
            "+1:00:00", "12:-1:00", "ab:cd:ef", "１２:00:00",
        ] {
            assert!(parse_hms(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn ordering_follows_total_seconds() {
        let a = parse_hms("00:00:05").unwrap();
        let b = parse_hms("00:00:10").unwrap();
        assert!(a < b);
        assert_eq!(b.as_ms(), 10_000);
    }
}
