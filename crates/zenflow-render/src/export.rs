//! Export file naming.

use crate::surface::ImageFormat;
use chrono::{DateTime, Utc};

const MAX_STEM_LEN: usize = 50;

/// Download-style file name for an exported artwork:
/// `<sanitised title>-<unix millis>.<ext>`.
///
/// The title is lower-cased and every character outside `[a-z0-9]` becomes
/// `-`, then cut to 50 characters.
pub fn export_file_name(title: &str, now: DateTime<Utc>, format: ImageFormat) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' }
        })
        .take(MAX_STEM_LEN)
        .collect();
    let stem = if stem.is_empty() { "artwork".to_string() } else { stem };
    format!("{}-{}.{}", stem, now.timestamp_millis(), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()
    }

    #[test]
    fn test_sanitises_title() {
        assert_eq!(
            export_file_name("Flow 2024-03-09 07:05:02", at(), ImageFormat::Jpeg),
            "flow-2024-03-09-07-05-02-1700000000123.jpg"
        );
    }

    #[test]
    fn test_truncates_long_titles() {
        let name = export_file_name(&"A".repeat(80), at(), ImageFormat::Png);
        assert_eq!(name, format!("{}-1700000000123.png", "a".repeat(50)));
    }

    #[test]
    fn test_non_ascii_becomes_dash() {
        assert_eq!(export_file_name("禅 Zen!", at(), ImageFormat::Png), "--zen--1700000000123.png");
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(export_file_name("", at(), ImageFormat::Png), "artwork-1700000000123.png");
    }
}
