//! Content validation.

use std::fmt;

use crate::error::ValidationError;

/// Upper bound on content length, in Unicode scalar values.
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Text that passed validation: trimmed, non-empty and within [`MAX_CONTENT_CHARS`].
///
/// Only validators in this crate can build one, so holding a `Content` is proof the text
/// was checked.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Content(String);

impl Content {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in Unicode scalar values.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for Content {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    None,
    Empty,
    TooLong,
}

/// Outcome of validating raw input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(Content),
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn reason(&self) -> Reason {
        match self {
            Self::Valid(_) => Reason::None,
            Self::Invalid(err) => err.reason(),
        }
    }

    pub fn into_result(self) -> Result<Content, ValidationError> {
        match self {
            Self::Valid(content) => Ok(content),
            Self::Invalid(err) => Err(err),
        }
    }
}

/// Decides whether raw input may be turned into a QR code.
pub trait Validator: Send + Sync {
    fn validate(&self, raw: &str) -> ValidationResult;
}

/// The stock validator: trims surrounding whitespace, then checks emptiness and length.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextValidator;

impl Validator for TextValidator {
    fn validate(&self, raw: &str) -> ValidationResult {
        validate(raw)
    }
}

/// Validates `raw` with the stock rules.
pub fn validate(raw: &str) -> ValidationResult {
    let text = trim(raw);
    if text.is_empty() {
        return ValidationResult::Invalid(ValidationError::Empty);
    }
    let length = text.chars().count();
    if length > MAX_CONTENT_CHARS {
        return ValidationResult::Invalid(ValidationError::TooLong {
            length,
            max: MAX_CONTENT_CHARS,
        });
    }
    ValidationResult::Valid(Content(text.to_owned()))
}

/// Whitespace as browsers see it: Unicode `White_Space` plus the byte order mark.
pub(crate) fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

pub(crate) fn trim(raw: &str) -> &str {
    raw.trim_matches(is_blank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(validate("").reason(), Reason::Empty);
        assert_eq!(validate("   ").reason(), Reason::Empty);
        assert_eq!(validate("\t\n\u{feff}\u{3000}").reason(), Reason::Empty);
        assert!(!validate("   ").is_valid());
    }

    #[test]
    fn test_length_bound() {
        let at_limit = "a".repeat(MAX_CONTENT_CHARS);
        assert!(validate(&at_limit).is_valid());

        let over = "a".repeat(MAX_CONTENT_CHARS + 1);
        assert_eq!(
            validate(&over),
            ValidationResult::Invalid(ValidationError::TooLong { length: 2001, max: 2000 })
        );
    }

    #[test]
    fn test_length_counts_characters_after_trimming() {
        let wide = "語".repeat(MAX_CONTENT_CHARS);
        assert!(validate(&wide).is_valid());

        let padded = format!("   {}   ", "b".repeat(MAX_CONTENT_CHARS));
        assert!(validate(&padded).is_valid());
    }

    #[test]
    fn test_valid_content_is_trimmed() {
        let content = validate("  https://example.com \n").into_result().unwrap();
        assert_eq!(content.as_str(), "https://example.com");
        assert_eq!(content.char_len(), 19);
    }

    #[test]
    fn test_result_never_valid_with_reason() {
        let result = validate("hello");
        assert!(result.is_valid());
        assert_eq!(result.reason(), Reason::None);
    }
}
