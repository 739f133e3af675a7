//! Text analysis module for Wakachi.
//!
//! This module provides script detection, the analyzer boundary, the Japanese
//! tokenizer and post-hoc token filters.

pub mod analyzer;
pub mod script;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use script::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
