//! Download file names derived from arbitrary user text.
//!
//! Names look like `qrcode-<label>-<timestamp>.png`. The label is a folded, lower-case slug of
//! the content; when the content has no Latin letters or digits at all, the hex digits of its
//! UTF-8 encoding are used instead, and `content` is the last resort.

use chrono::{DateTime, Utc};
use unicode_normalization::UnicodeNormalization;

use crate::validate::is_blank;

const MAX_LABEL_CHARS: usize = 24;
const FALLBACK_LABEL: &str = "content";

/// Builds the file name for exporting `content` at `timestamp`.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use qrstudio::filename::derive_filename;
///
/// let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();
/// assert_eq!(derive_filename("Café déjà vu", at), "qrcode-cafe-deja-vu-2024-05-01T12-30-05.png");
/// ```
pub fn derive_filename(content: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "qrcode-{}-{}.png",
        filename_label(content),
        timestamp.format("%Y-%m-%dT%H-%M-%S")
    )
}

/// The `<label>` part of [`derive_filename`].
pub fn filename_label(content: &str) -> String {
    if content.is_empty() {
        return FALLBACK_LABEL.to_owned();
    }

    let sanitized = slugify(&fold_accents(content));
    if !sanitized.is_empty() {
        return sanitized;
    }

    let encoded: String = percent_encode_component(content)
        .chars()
        .filter(|&c| c != '%')
        .collect();
    let encoded = keep_label_chars(&encoded);
    if encoded.is_empty() {
        FALLBACK_LABEL.to_owned()
    } else {
        encoded
    }
}

/// Canonical decomposition with the combining diacritical marks block removed.
fn fold_accents(text: &str) -> String {
    text.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

fn slugify(text: &str) -> String {
    let mut hyphenated = String::with_capacity(text.len());
    let mut in_blank = false;
    for c in text.chars() {
        if is_blank(c) {
            if !in_blank {
                hyphenated.push('-');
            }
            in_blank = true;
        } else {
            hyphenated.push(c);
            in_blank = false;
        }
    }
    keep_label_chars(&hyphenated)
}

/// Drops every character outside `[A-Za-z0-9_-]`, lower-cases and truncates to the label limit.
fn keep_label_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        .take(MAX_LABEL_CHARS)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Percent-encodes everything except the URI-component unreserved set
/// (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`).
fn percent_encode_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for byte in text.bytes() {
        let c = char::from(byte);
        if c.is_ascii_alphanumeric() || "-_.!~*'()".contains(c) {
            out.push(c);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap()
    }

    fn matches_pattern(name: &str) -> bool {
        let Some(rest) = name.strip_prefix("qrcode-") else { return false };
        let Some(rest) = rest.strip_suffix(".png") else { return false };
        // timestamp is fixed width: YYYY-MM-DDTHH-MM-SS
        if rest.len() < 21 {
            return false;
        }
        let (label, ts) = rest.split_at(rest.len() - 19);
        let Some(label) = label.strip_suffix('-') else { return false };
        let ts_ok = ts.chars().enumerate().all(|(i, c)| match i {
            4 | 7 | 13 | 16 => c == '-',
            10 => c == 'T',
            _ => c.is_ascii_digit(),
        });
        let label_ok = (1..=24).contains(&label.len())
            && label
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        ts_ok && label_ok
    }

    #[test]
    fn test_accents_are_folded() {
        let name = derive_filename("Café déjà vu", at());
        assert_eq!(name, "qrcode-cafe-deja-vu-2024-05-01T12-30-05.png");
    }

    #[test]
    fn test_compatibility_characters_are_not_folded() {
        // canonical decomposition leaves ligatures and full-width forms alone
        assert_eq!(filename_label("ﬁle"), "le");
        assert_eq!(filename_label("ＡＢＣ"), "efbca1efbca2efbca3");
    }

    #[test]
    fn test_whitespace_runs_become_one_hyphen() {
        assert_eq!(filename_label("Hello \t\n  World"), "hello-world");
        assert_eq!(filename_label("a ! b"), "a--b");
    }

    #[test]
    fn test_label_is_truncated() {
        let label = filename_label("https://example.com/some/very/long/path");
        assert_eq!(label, "httpsexamplecomsomeveryl");
        assert_eq!(label.len(), 24);
    }

    #[test]
    fn test_non_latin_falls_back_to_encoded_bytes() {
        assert_eq!(filename_label("日本語"), "e697a5e69cace8aa9e");
        assert_eq!(filename_label("🎉"), "f09f8e89");
        // A surviving hyphen is enough to skip the fallback.
        assert_eq!(filename_label("Привет мир"), "-");
    }

    #[test]
    fn test_fallback_to_content() {
        assert_eq!(derive_filename("", at()), "qrcode-content-2024-05-01T12-30-05.png");
        assert_eq!(filename_label("!!!"), "content");
        assert_eq!(filename_label("*"), "content");
    }

    #[test]
    fn test_names_are_filesystem_safe() {
        let samples = [
            "Café déjà vu",
            "日本語",
            "!!!",
            "https://example.com/?q=a b",
            "  \u{3000}",
            "ÅÄÖ åäö",
            "tab\tseparated\tvalues",
            "~*'()",
            "emoji 🎉 party",
            "UPPER_case-mix 123",
        ];
        for sample in samples {
            let name = derive_filename(sample, at());
            assert!(matches_pattern(&name), "{name:?} from {sample:?}");
        }
    }

    #[test]
    fn test_percent_encoding_matches_uri_component_rules() {
        assert_eq!(percent_encode_component("a b/é~"), "a%20b%2F%C3%A9~");
    }

    #[test]
    fn test_timestamp_has_whole_seconds() {
        let precise = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()
            + chrono::Duration::milliseconds(999);
        assert_eq!(
            derive_filename("x", precise),
            "qrcode-x-2023-12-31T23-59-59.png"
        );
    }
}
