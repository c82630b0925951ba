//! Input preconditions checked before any backend call.
//!
//! Length is measured in Unicode scalar values (`char`s), so `"ação"` counts
//! as four characters.  The length check runs before the emptiness check.

use thiserror::Error;

use super::error::ErrorKind;

/// Character limit used by the remote API backend.
pub const API_MAX_CHARS: usize = 500;

/// Why an input was rejected.  Shown as a modal warning; never logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor, digite algum texto para corrigir.")]
    Empty,

    #[error("O texto excede o limite de {limit} caracteres!")]
    TooLong { limit: usize, count: usize },
}

impl ValidationError {
    /// Dialog title.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::Empty => "Texto Vazio",
            ValidationError::TooLong { .. } => "Texto Muito Longo",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Empty => ErrorKind::EmptyInput,
            ValidationError::TooLong { .. } => ErrorKind::TooLong,
        }
    }
}

/// Pure validator; `max_chars = None` disables the length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputValidator {
    max_chars: Option<usize>,
}

impl InputValidator {
    pub fn new(max_chars: Option<usize>) -> Self {
        Self { max_chars }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    pub fn max_chars(&self) -> Option<usize> {
        self.max_chars
    }

    pub fn char_count(text: &str) -> usize {
        text.chars().count()
    }

    /// `true` when a limit is set and `text` exceeds it.
    pub fn exceeds_limit(&self, text: &str) -> bool {
        self.max_chars
            .is_some_and(|limit| Self::char_count(text) > limit)
    }

    /// Return `text` unchanged, or the reason it cannot be submitted.
    pub fn validate<'a>(&self, text: &'a str) -> Result<&'a str, ValidationError> {
        if let Some(limit) = self.max_chars {
            let count = Self::char_count(text);
            if count > limit {
                return Err(ValidationError::TooLong { limit, count });
            }
        }
        if text.trim().is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(text)
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new(Some(API_MAX_CHARS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace() {
        let v = InputValidator::default();
        for input in ["", " ", "\n\t  \r\n", "\u{3000}"] {
            assert_eq!(v.validate(input), Err(ValidationError::Empty), "{input:?}");
        }
        assert_eq!(
            InputValidator::unbounded().validate("   "),
            Err(ValidationError::Empty)
        );
    }

    #[test]
    fn passes_text_through_unchanged() {
        let v = InputValidator::default();
        let input = "  helo wrld \n";
        assert_eq!(v.validate(input), Ok(input));
    }

    #[test]
    fn limit_is_inclusive() {
        let v = InputValidator::new(Some(500));
        let at_limit = "a".repeat(500);
        assert!(v.validate(&at_limit).is_ok());

        let over = "a".repeat(501);
        assert_eq!(
            v.validate(&over),
            Err(ValidationError::TooLong {
                limit: 500,
                count: 501
            })
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        let v = InputValidator::new(Some(4));
        assert!(v.validate("ação").is_ok());
        assert!(v.exceeds_limit("ações"));
        assert_eq!(InputValidator::char_count("rápido"), 6);
    }

    #[test]
    fn length_is_checked_before_emptiness() {
        let v = InputValidator::new(Some(3));
        let result = v.validate("      ");
        assert!(matches!(result, Err(ValidationError::TooLong { .. })));
    }

    #[test]
    fn unbounded_accepts_long_text() {
        let v = InputValidator::unbounded();
        let long = "palavra ".repeat(1_000);
        assert!(v.validate(&long).is_ok());
        assert!(!v.exceeds_limit(&long));
    }

    #[test]
    fn dialog_text() {
        let e = ValidationError::TooLong {
            limit: 500,
            count: 612,
        };
        assert_eq!(e.title(), "Texto Muito Longo");
        assert_eq!(e.to_string(), "O texto excede o limite de 500 caracteres!");
        assert_eq!(e.kind(), ErrorKind::TooLong);

        assert_eq!(ValidationError::Empty.title(), "Texto Vazio");
        assert_eq!(ValidationError::Empty.kind(), ErrorKind::EmptyInput);
    }
}
