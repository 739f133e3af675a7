//! Token types produced by Japanese tokenization.
//!
//! # Core Types
//!
//! - [`Token`] - one segmented unit with its reading, part of speech and lemma
//! - [`SkippedSpan`] - a span the analyzer failed on during partial processing
//! - [`TokenizeOutput`] - tokens plus skipped spans from one call
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::token::Token;
//!
//! let token = Token::new("食べ", 0)
//!     .with_reading("タベ")
//!     .with_part_of_speech("動詞")
//!     .with_base_form("食べる");
//!
//! assert_eq!(token.dictionary_form(), "食べる");
//! assert!(token.is_inflected());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FailedSpan;

/// A single unit of segmented Japanese text.
///
/// Tokens are built once per analyzer segment and not mutated afterwards.
/// Within one tokenization call they come in non-decreasing `position` order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Exact text as it appeared in the input. Never empty.
    pub surface: String,

    /// Katakana reading, empty if the analyzer has none.
    pub reading: String,

    /// Coarse part-of-speech tag (e.g. `名詞`, `動詞`, `助詞`).
    pub part_of_speech: String,

    /// Lemma for inflected words, empty if the analyzer has none.
    pub base_form: String,

    /// Canonical spelling variant, empty if the analyzer has none.
    pub normalized_form: String,

    /// Full part-of-speech hierarchy followed by any extra analyzer features.
    pub features: Vec<String>,

    /// Character offset of the first character of `surface` in the input.
    pub position: usize,
}

impl Token {
    /// Create a token with only a surface form and position.
    pub fn new<S: Into<String>>(surface: S, position: usize) -> Self {
        Token {
            surface: surface.into(),
            reading: String::new(),
            part_of_speech: String::new(),
            base_form: String::new(),
            normalized_form: String::new(),
            features: Vec::new(),
            position,
        }
    }

    /// Set the reading.
    pub fn with_reading<S: Into<String>>(mut self, reading: S) -> Self {
        self.reading = reading.into();
        self
    }

    /// Set the coarse part-of-speech tag.
    pub fn with_part_of_speech<S: Into<String>>(mut self, pos: S) -> Self {
        self.part_of_speech = pos.into();
        self
    }

    /// Set the base form.
    pub fn with_base_form<S: Into<String>>(mut self, base_form: S) -> Self {
        self.base_form = base_form.into();
        self
    }

    /// Set the normalized form.
    pub fn with_normalized_form<S: Into<String>>(mut self, normalized: S) -> Self {
        self.normalized_form = normalized.into();
        self
    }

    /// Set the feature list.
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// The dictionary form: `base_form` when present, otherwise `surface`.
    pub fn dictionary_form(&self) -> &str {
        if self.base_form.is_empty() {
            &self.surface
        } else {
            &self.base_form
        }
    }

    /// Whether the surface differs from the dictionary form.
    pub fn is_inflected(&self) -> bool {
        self.surface != self.dictionary_form()
    }

    /// Length of the surface in characters.
    pub fn char_len(&self) -> usize {
        self.surface.chars().count()
    }

    /// Character offset just past the end of the surface.
    pub fn end_position(&self) -> usize {
        self.position + self.char_len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.surface)
    }
}

/// A span skipped during partial processing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSpan {
    /// Text the analyzer failed on.
    pub surface: String,
    /// Character offset of the span in the input.
    pub position: usize,
    /// Why the span was skipped.
    pub reason: String,
}

impl From<FailedSpan> for SkippedSpan {
    fn from(span: FailedSpan) -> Self {
        SkippedSpan {
            surface: span.surface,
            position: span.position,
            reason: span.reason,
        }
    }
}

impl fmt::Display for SkippedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "skipped '{}' at character {}: {}",
            self.surface, self.position, self.reason
        )
    }
}

/// The result of one tokenization call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizeOutput {
    /// Tokens in input order.
    pub tokens: Vec<Token>,
    /// Spans skipped because the analyzer failed on them.
    pub skipped: Vec<SkippedSpan>,
}

impl TokenizeOutput {
    /// Whether every segment was tokenized.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Drop the skipped-span records and keep the tokens.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("食べた", 0)
            .with_reading("タベタ")
            .with_part_of_speech("動詞")
            .with_base_form("食べる")
            .with_normalized_form("食べる")
            .with_features(["動詞", "一般", "*", "*"]);

        assert_eq!(token.surface, "食べた");
        assert_eq!(token.reading, "タベタ");
        assert_eq!(token.base_form, "食べる");
        assert_eq!(token.dictionary_form(), "食べる");
        assert_eq!(token.features.len(), 4);
    }

    #[test]
    fn test_dictionary_form_fallback() {
        let token = Token::new("こんにちは", 0)
            .with_reading("コンニチハ")
            .with_part_of_speech("感動詞")
            .with_normalized_form("こんにちは");

        assert_eq!(token.dictionary_form(), "こんにちは");
        assert!(!token.is_inflected());
    }

    #[test]
    fn test_dictionary_form_both_empty() {
        let token = Token::new("", 0);
        assert_eq!(token.dictionary_form(), "");
    }

    #[test]
    fn test_positions_in_characters() {
        let token = Token::new("天気", 5);
        assert_eq!(token.char_len(), 2);
        assert_eq!(token.end_position(), 7);
        assert_eq!(token.to_string(), "天気");
    }

    #[test]
    fn test_skipped_span_from_failed_span() {
        let skipped = SkippedSpan::from(FailedSpan {
            surface: "𠮷".to_string(),
            position: 2,
            reason: "no entry".to_string(),
        });
        assert_eq!(skipped.position, 2);
        assert_eq!(skipped.to_string(), "skipped '𠮷' at character 2: no entry");

        let output = TokenizeOutput {
            tokens: Vec::new(),
            skipped: vec![skipped],
        };
        assert!(!output.is_complete());
    }
}
