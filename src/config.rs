//! Configuration for Japanese tokenization.
//!
//! A [`TokenizerConfig`] is fixed when a tokenizer is built. Only the
//! [`TokenizationMode`] can be changed afterwards, through
//! [`JapaneseTokenizer::set_mode`](crate::analysis::tokenizer::JapaneseTokenizer::set_mode).
//! Per-call behavior is controlled with [`TokenizeOptions`].
//!
//! # Examples
//!
//! ```
//! use wakachi::config::{DictionaryKind, TokenizationMode, TokenizerConfig};
//!
//! let config = TokenizerConfig::default()
//!     .with_mode(TokenizationMode::Short)
//!     .with_dictionary(DictionaryKind::Core)
//!     .lazy(true);
//!
//! assert_eq!(config.mode, TokenizationMode::Short);
//! assert_eq!(config.dictionary.name(), "core");
//! assert!(config.lazy_init);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::script::MIXED_SCRIPT_THRESHOLD;
use crate::error::{Result, WakachiError};

/// Segmentation granularity.
///
/// The only behavioral difference between modes is the parameter handed to the
/// analyzer. Moving from `Short` to `Long` merges compounds, it never splits them
/// further, so a `Short` segmentation has at least as many tokens as a `Long` one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizationMode {
    /// Finest morpheme splitting (compound verbs split into stem + auxiliary).
    Short,
    /// Balanced granularity for general vocabulary work.
    #[default]
    Medium,
    /// Compounds merged into headword-sized units.
    Long,
}

impl TokenizationMode {
    /// All modes, finest first.
    pub const ALL: [TokenizationMode; 3] = [
        TokenizationMode::Short,
        TokenizationMode::Medium,
        TokenizationMode::Long,
    ];

    /// Lowercase name used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            TokenizationMode::Short => "short",
            TokenizationMode::Medium => "medium",
            TokenizationMode::Long => "long",
        }
    }

    /// Sudachi-style split mode letter (`A`, `B` or `C`).
    pub fn split_letter(self) -> char {
        match self {
            TokenizationMode::Short => 'A',
            TokenizationMode::Medium => 'B',
            TokenizationMode::Long => 'C',
        }
    }
}

impl fmt::Display for TokenizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenizationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" | "a" => Ok(TokenizationMode::Short),
            "medium" | "b" => Ok(TokenizationMode::Medium),
            "long" | "c" => Ok(TokenizationMode::Long),
            other => Err(format!(
                "unknown tokenization mode '{other}' (expected short, medium or long)"
            )),
        }
    }
}

/// The named dictionaries an analyzer can be initialized with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryKind {
    /// Compact general-purpose dictionary.
    Core,
    /// Full dictionary with the widest vocabulary coverage.
    #[default]
    Full,
}

impl DictionaryKind {
    /// All dictionaries, in order of size.
    pub const ALL: [DictionaryKind; 2] = [DictionaryKind::Core, DictionaryKind::Full];

    /// Lowercase name used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            DictionaryKind::Core => "core",
            DictionaryKind::Full => "full",
        }
    }
}

impl fmt::Display for DictionaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DictionaryKind {
    type Err = WakachiError;

    /// Resolve a dictionary name. Unknown names are an initialization failure.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "core" => Ok(DictionaryKind::Core),
            "full" => Ok(DictionaryKind::Full),
            other => Err(
                WakachiError::initialization(other, "unknown dictionary name")
                    .with_remediation("use one of: core, full"),
            ),
        }
    }
}

/// Configuration for a tokenizer instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Segmentation granularity.
    pub mode: TokenizationMode,
    /// Dictionary the analyzer is initialized with.
    pub dictionary: DictionaryKind,
    /// Defer analyzer initialization to the first tokenization call.
    pub lazy_init: bool,
    /// Share of foreign-script letters above which text counts as mixed.
    pub mixed_script_threshold: f32,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            mode: TokenizationMode::default(),
            dictionary: DictionaryKind::default(),
            lazy_init: false,
            mixed_script_threshold: MIXED_SCRIPT_THRESHOLD,
        }
    }
}

impl TokenizerConfig {
    /// Set the tokenization mode.
    pub fn with_mode(mut self, mode: TokenizationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the dictionary.
    pub fn with_dictionary(mut self, dictionary: DictionaryKind) -> Self {
        self.dictionary = dictionary;
        self
    }

    /// Enable or disable lazy initialization.
    pub fn lazy(mut self, lazy_init: bool) -> Self {
        self.lazy_init = lazy_init;
        self
    }

    /// Set the mixed-script threshold, clamped to `0.0..=1.0`.
    pub fn with_mixed_script_threshold(mut self, threshold: f32) -> Self {
        self.mixed_script_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

/// Per-call tokenization options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizeOptions {
    /// Skip and record segments the analyzer fails on instead of aborting.
    pub partial_ok: bool,
}

impl TokenizeOptions {
    /// Options with partial processing enabled.
    pub fn partial() -> Self {
        Self { partial_ok: true }
    }
}
