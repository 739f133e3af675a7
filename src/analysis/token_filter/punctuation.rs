//! Punctuation filter implementation.
//!
//! Removes common Japanese and ASCII punctuation marks, as well as any token
//! the analyzer tagged as a symbol.
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::token::Token;
//! use wakachi::analysis::token_filter::TokenFilter;
//! use wakachi::analysis::token_filter::punctuation::PunctuationFilter;
//!
//! let tokens = vec![
//!     Token::new("こんにちは", 0).with_part_of_speech("感動詞"),
//!     Token::new("。", 5),
//! ];
//!
//! let result = PunctuationFilter::new().filter(tokens);
//! assert_eq!(result.len(), 1);
//! ```

use std::sync::{Arc, LazyLock};

use ahash::AHashSet;

use crate::analysis::token::Token;
use crate::analysis::token_filter::TokenFilter;

const DEFAULT_PUNCTUATION: &[&str] = &[
    // Japanese
    "。", "、", "！", "？", "「", "」", "『", "』", "（", "）", "【", "】", "・", "ー", "～",
    "…", "‥",
    // ASCII
    ".", ",", "!", "?", "\"", "'", "(", ")", "[", "]", "{", "}", "-", "_", ":", ";", "/", "\\",
    "|",
];

/// Part-of-speech tags for symbols (UniDic and IPADIC respectively).
const SYMBOL_POS: &[&str] = &["補助記号", "記号"];

/// Default punctuation marks as a set.
pub static DEFAULT_PUNCTUATION_SET: LazyLock<AHashSet<String>> = LazyLock::new(|| {
    DEFAULT_PUNCTUATION
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that removes punctuation tokens.
///
/// A token is removed when its surface is one of the punctuation marks, or when
/// its coarse part of speech is `補助記号` or `記号`.
#[derive(Clone, Debug)]
pub struct PunctuationFilter {
    marks: Arc<AHashSet<String>>,
}

impl Default for PunctuationFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PunctuationFilter {
    /// Create a filter with the default punctuation marks.
    pub fn new() -> Self {
        PunctuationFilter {
            marks: Arc::new(DEFAULT_PUNCTUATION_SET.clone()),
        }
    }

    /// Create a filter with a custom set of marks.
    pub fn from_marks<I, S>(marks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PunctuationFilter {
            marks: Arc::new(marks.into_iter().map(Into::into).collect()),
        }
    }

    /// Whether `token` is removed by this filter.
    pub fn is_punctuation(&self, token: &Token) -> bool {
        self.marks.contains(&token.surface) || SYMBOL_POS.contains(&token.part_of_speech.as_str())
    }
}

impl TokenFilter for PunctuationFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter(|token| !self.is_punctuation(token))
            .collect()
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_filter() {
        let tokens = vec![
            Token::new("元気", 0).with_part_of_speech("形状詞"),
            Token::new("です", 2).with_part_of_speech("助動詞"),
            Token::new("か", 4).with_part_of_speech("助詞"),
            Token::new("？", 5),
            Token::new("!", 6),
        ];

        let result = PunctuationFilter::new().filter(tokens);
        let surfaces: Vec<&str> = result.iter().map(|t| t.surface.as_str()).collect();

        assert_eq!(surfaces, vec!["元気", "です", "か"]);
    }

    #[test]
    fn test_symbol_pos_is_removed() {
        let filter = PunctuationFilter::new();

        assert!(filter.is_punctuation(&Token::new("※", 0).with_part_of_speech("補助記号")));
        assert!(filter.is_punctuation(&Token::new("♪", 0).with_part_of_speech("記号")));
        assert!(!filter.is_punctuation(&Token::new("※", 0).with_part_of_speech("名詞")));
    }

    #[test]
    fn test_custom_marks() {
        let filter = PunctuationFilter::from_marks(["〜"]);

        assert!(filter.is_punctuation(&Token::new("〜", 0)));
        assert!(!filter.is_punctuation(&Token::new("。", 0)));
    }
}
