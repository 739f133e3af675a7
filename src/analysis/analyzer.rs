//! The morphological analyzer capability boundary.
//!
//! Wakachi does not analyze Japanese itself. It drives an external engine through
//! [`MorphologicalAnalyzer`] and maps the engine's [`RawSegment`]s into
//! [`Token`](crate::analysis::token::Token)s. Engines report failures with the
//! crate-owned [`AnalyzerError`] and [`SegmentFailure`] types, never with their
//! native error types, so the tokenizer can reclassify them.
//!
//! # Available Analyzers
//!
//! - [`lindera::LinderaAnalyzer`] - Lindera with IPADIC / UniDic (requires the `lindera` feature)
//! - [`mock::MockAnalyzer`] - deterministic lexicon-driven analyzer for tests
//!
//! # Examples
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use wakachi::analysis::analyzer::{AnalyzerError, MorphologicalAnalyzer, RawSegment, SegmentOutcome};
//! use wakachi::config::{DictionaryKind, TokenizationMode};
//!
//! /// Treats every character as one segment.
//! struct CharAnalyzer;
//!
//! impl MorphologicalAnalyzer for CharAnalyzer {
//!     type Handle = ();
//!
//!     fn initialize(&self, _: DictionaryKind, _: TokenizationMode) -> Result<(), AnalyzerError> {
//!         Ok(())
//!     }
//!
//!     fn segment(
//!         &self,
//!         _: &mut (),
//!         text: &str,
//!         _: TokenizationMode,
//!     ) -> Result<Vec<SegmentOutcome>, AnalyzerError> {
//!         Ok(text.chars().map(|c| Ok(RawSegment::new(c.to_string()))).collect())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "char"
//!     }
//! }
//! ```

use std::fmt;

use crate::config::{DictionaryKind, TokenizationMode};

pub mod mock;

#[cfg(feature = "lindera")]
pub mod lindera;

/// One segment as reported by an analyzer.
///
/// Optional fields are `None` (or empty) when the engine does not supply them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawSegment {
    /// Surface text of the segment.
    pub surface: String,
    /// Byte offset of the segment in the analyzed text, if the engine reports it.
    pub byte_offset: Option<usize>,
    /// Reading in katakana.
    pub reading: Option<String>,
    /// Part-of-speech hierarchy, coarsest tag first.
    pub part_of_speech: Vec<String>,
    /// Lemma for inflected words.
    pub base_form: Option<String>,
    /// Canonical spelling variant.
    pub normalized_form: Option<String>,
    /// Extra engine-specific features (conjugation type, form, ...).
    pub features: Vec<String>,
}

impl RawSegment {
    /// Create a segment with only a surface form.
    pub fn new<S: Into<String>>(surface: S) -> Self {
        RawSegment {
            surface: surface.into(),
            ..Default::default()
        }
    }

    /// Set the byte offset.
    pub fn at(mut self, byte_offset: usize) -> Self {
        self.byte_offset = Some(byte_offset);
        self
    }

    /// Set the reading.
    pub fn with_reading<S: Into<String>>(mut self, reading: S) -> Self {
        self.reading = Some(reading.into());
        self
    }

    /// Set the part-of-speech hierarchy.
    pub fn with_part_of_speech<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.part_of_speech = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the base form.
    pub fn with_base_form<S: Into<String>>(mut self, base_form: S) -> Self {
        self.base_form = Some(base_form.into());
        self
    }

    /// Set the normalized form.
    pub fn with_normalized_form<S: Into<String>>(mut self, normalized: S) -> Self {
        self.normalized_form = Some(normalized.into());
        self
    }

    /// Set the extra features.
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }
}

/// The analyzer could not handle one sub-span of the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentFailure {
    /// Text of the failing span.
    pub surface: String,
    /// Byte offset of the span, if known.
    pub byte_offset: Option<usize>,
    /// Why the analyzer failed.
    pub reason: String,
}

impl SegmentFailure {
    pub fn new<S: Into<String>, R: Into<String>>(surface: S, reason: R) -> Self {
        SegmentFailure {
            surface: surface.into(),
            byte_offset: None,
            reason: reason.into(),
        }
    }

    /// Set the byte offset.
    pub fn at(mut self, byte_offset: usize) -> Self {
        self.byte_offset = Some(byte_offset);
        self
    }
}

/// Per-segment result reported by an analyzer.
pub type SegmentOutcome = std::result::Result<RawSegment, SegmentFailure>;

/// A whole-call analyzer failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzerError {
    /// What went wrong.
    pub message: String,
    /// Setup or usage hint, if one applies.
    pub remediation: Option<String>,
}

impl AnalyzerError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        AnalyzerError {
            message: message.into(),
            remediation: None,
        }
    }

    /// Attach a remediation hint.
    pub fn with_remediation<S: Into<String>>(mut self, hint: S) -> Self {
        self.remediation = Some(hint.into());
        self
    }
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AnalyzerError {}

/// An external morphological analysis engine.
///
/// `initialize` is the expensive, one-time step that loads a dictionary and
/// returns a handle. `segment` is the cheap, repeatable step. A handle is not
/// required to be usable from several threads at once.
pub trait MorphologicalAnalyzer {
    /// Loaded engine state.
    type Handle;

    /// Load `dictionary` and prepare the engine for `mode`.
    fn initialize(
        &self,
        dictionary: DictionaryKind,
        mode: TokenizationMode,
    ) -> Result<Self::Handle, AnalyzerError>;

    /// Segment `text` at `mode` granularity.
    ///
    /// Segments are reported in text order. A failing sub-span is reported as an
    /// `Err` entry in place; an `Err` return aborts the whole call.
    fn segment(
        &self,
        handle: &mut Self::Handle,
        text: &str,
        mode: TokenizationMode,
    ) -> Result<Vec<SegmentOutcome>, AnalyzerError>;

    /// Name of the engine (for logging and diagnostics).
    fn name(&self) -> &'static str;
}
