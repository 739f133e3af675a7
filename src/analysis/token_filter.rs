//! Token filters applied after segmentation.
//!
//! Filters receive the tokens of one tokenization call and return the tokens to
//! keep. They run in registration order, see
//! [`JapaneseTokenizer::add_filter`](crate::analysis::tokenizer::JapaneseTokenizer::add_filter).
//!
//! # Available Filters
//!
//! - [`particle::ParticleFilter`] - Removes particles (`助詞`)
//! - [`punctuation::PunctuationFilter`] - Removes punctuation and symbols
//!
//! # Examples
//!
//! Implementing a custom filter:
//!
//! ```
//! use wakachi::analysis::token::Token;
//! use wakachi::analysis::token_filter::TokenFilter;
//!
//! /// Keeps only tokens with a kanji in them.
//! struct KanjiOnlyFilter;
//!
//! impl TokenFilter for KanjiOnlyFilter {
//!     fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
//!         tokens
//!             .into_iter()
//!             .filter(|t| t.surface.chars().any(|c| ('\u{4E00}'..='\u{9FFF}').contains(&c)))
//!             .collect()
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "kanji_only"
//!     }
//! }
//!
//! let tokens = vec![Token::new("猫", 0), Token::new("が", 1)];
//! assert_eq!(KanjiOnlyFilter.filter(tokens).len(), 1);
//! ```

use crate::analysis::token::Token;

/// Trait for filters that post-process tokens.
///
/// Filters must not reorder tokens. Removing tokens is fine.
pub trait TokenFilter: Send + Sync {
    /// Apply this filter to the tokens of one call.
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod particle;
pub mod punctuation;
