//! # Wakachi
//!
//! Japanese text tokenization for vocabulary extraction.
//!
//! ## Features
//!
//! - Script-based validation of Japanese input
//! - Segmentation at short, medium or long granularity through a pluggable
//!   morphological analyzer (Lindera with the `lindera` feature)
//! - Lemma lookup with a surface-form fallback
//! - Strict UTF-8 file ingestion with binary and encoding checks
//! - Partial processing that records failing spans instead of aborting
//!
//! ## Example
//!
//! ```
//! use wakachi::analysis::analyzer::mock::MockAnalyzer;
//! use wakachi::analysis::tokenizer::JapaneseTokenizer;
//! use wakachi::config::TokenizerConfig;
//!
//! let mut tokenizer =
//!     JapaneseTokenizer::with_analyzer(MockAnalyzer::with_default_lexicon(), TokenizerConfig::default())?;
//! let tokens = tokenizer.tokenize_text("今日は良い天気です")?;
//! assert_eq!(tokens[0].surface, "今日");
//! # Ok::<(), wakachi::error::WakachiError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod input;

pub mod prelude {
    pub use crate::analysis::analyzer::MorphologicalAnalyzer;
    pub use crate::analysis::script::{Classification, classify, contains_japanese};
    pub use crate::analysis::token::{SkippedSpan, Token, TokenizeOutput};
    pub use crate::analysis::token_filter::TokenFilter;
    pub use crate::analysis::tokenizer::JapaneseTokenizer;
    pub use crate::config::{DictionaryKind, TokenizationMode, TokenizeOptions, TokenizerConfig};
    pub use crate::error::{Result, WakachiError};
    pub use crate::input::read_japanese_file;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
