//! Error types for the Wakachi library.
//!
//! Failures are partitioned into three classes with distinct handling:
//!
//! - [`WakachiError::TokenizerInitialization`] - the analyzer or its dictionary
//!   could not be set up. Fatal for the tokenizer instance.
//! - [`WakachiError::FileProcessing`] - the input file could not be turned into
//!   text (missing, directory, empty, binary, wrong encoding). Fatal for the call.
//! - [`WakachiError::Tokenization`] - the text could not be segmented (no
//!   Japanese content, or an analyzer failure while partial processing is off).
//!   Fatal for the call.
//!
//! Spans skipped during partial processing are not errors; they are reported as
//! [`SkippedSpan`](crate::analysis::token::SkippedSpan) records next to the tokens.
//!
//! # Examples
//!
//! ```
//! use wakachi::error::{ErrorKind, FileErrorKind, WakachiError};
//!
//! let err = WakachiError::file(FileErrorKind::Empty, "notes.txt", "file contains no data");
//! assert_eq!(err.kind(), ErrorKind::FileProcessing);
//! assert_eq!(err.file_kind(), Some(FileErrorKind::Empty));
//! assert!(err.remediation().is_some());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Span of input text that the analyzer failed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedSpan {
    /// Text of the failing span.
    pub surface: String,
    /// Character offset of the span in the original input.
    pub position: usize,
    /// Analyzer-reported reason.
    pub reason: String,
}

impl fmt::Display for FailedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' at character {}: {}",
            self.surface, self.position, self.reason
        )
    }
}

/// The stable class of an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Analyzer or dictionary setup failed.
    TokenizerInitialization,
    /// Reading or decoding an input file failed.
    FileProcessing,
    /// Segmenting text failed.
    Tokenization,
}

/// Why a file could not be ingested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileErrorKind {
    /// The path does not exist.
    NotFound,
    /// The path points at a directory.
    IsDirectory,
    /// The file has zero bytes.
    Empty,
    /// The bytes are not valid UTF-8.
    Encoding,
    /// The file looks like binary data.
    Binary,
    /// Any other I/O failure (permissions, interrupted reads, ...).
    Io,
}

impl FileErrorKind {
    fn label(self) -> &'static str {
        match self {
            FileErrorKind::NotFound => "not found",
            FileErrorKind::IsDirectory => "is a directory",
            FileErrorKind::Empty => "empty",
            FileErrorKind::Encoding => "encoding",
            FileErrorKind::Binary => "binary",
            FileErrorKind::Io => "io",
        }
    }

    fn default_remediation(self) -> Option<&'static str> {
        match self {
            FileErrorKind::NotFound => Some("check the path and that the file exists"),
            FileErrorKind::IsDirectory => Some("pass the path of a text file, not a directory"),
            FileErrorKind::Empty => {
                Some("the file is empty; add Japanese text to it or choose another file")
            }
            FileErrorKind::Encoding => Some(
                "re-save the file as UTF-8, e.g. `iconv -f SHIFT_JIS -t UTF-8 in.txt > out.txt` \
                 (use EUC-JP or UTF-16 as the source encoding if that matches the file)",
            ),
            FileErrorKind::Binary => Some("only plain text files can be tokenized"),
            FileErrorKind::Io => None,
        }
    }
}

impl fmt::Display for FileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why text could not be tokenized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenizationErrorKind {
    /// The input contains no hiragana, katakana or kanji.
    NoJapaneseContent,
    /// The analyzer failed on one segment and partial processing was off.
    SegmentFailed,
    /// The analyzer failed for the whole call.
    AnalyzerFailed,
}

impl fmt::Display for TokenizationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenizationErrorKind::NoJapaneseContent => "no Japanese content",
            TokenizationErrorKind::SegmentFailed => "segment failed",
            TokenizationErrorKind::AnalyzerFailed => "analyzer failed",
        })
    }
}

/// The main error type for Wakachi operations.
#[derive(Error, Debug)]
pub enum WakachiError {
    /// Analyzer or dictionary setup failed. The tokenizer instance is unusable.
    #[error("Tokenizer initialization error (dictionary '{dictionary}'): {message}")]
    TokenizerInitialization {
        /// Dictionary name or configuration value involved.
        dictionary: String,
        /// What went wrong.
        message: String,
        /// Setup hint, if one applies.
        remediation: Option<String>,
    },

    /// A file could not be read as text.
    #[error("File processing error ({kind}) for '{}': {message}", .path.display())]
    FileProcessing {
        /// Sub-kind of the failure.
        kind: FileErrorKind,
        /// The offending path.
        path: PathBuf,
        /// What went wrong.
        message: String,
        /// Actionable hint.
        remediation: Option<String>,
        /// Underlying I/O error, if any.
        #[source]
        source: Option<std::io::Error>,
    },

    /// Text could not be tokenized.
    #[error("Tokenization error ({kind}): {message}")]
    Tokenization {
        /// Sub-kind of the failure.
        kind: TokenizationErrorKind,
        /// What went wrong.
        message: String,
        /// The span the analyzer failed on, for segment failures.
        span: Option<FailedSpan>,
        /// Hint reported by the analyzer, overriding the default for `kind`.
        remediation: Option<String>,
    },
}

/// Result type alias for operations that may fail with WakachiError.
pub type Result<T> = std::result::Result<T, WakachiError>;

impl WakachiError {
    /// Create a new initialization error.
    pub fn initialization<D, M>(dictionary: D, message: M) -> Self
    where
        D: Into<String>,
        M: Into<String>,
    {
        WakachiError::TokenizerInitialization {
            dictionary: dictionary.into(),
            message: message.into(),
            remediation: None,
        }
    }

    /// Create a new file processing error with the default hint for `kind`.
    pub fn file<P, M>(kind: FileErrorKind, path: P, message: M) -> Self
    where
        P: AsRef<Path>,
        M: Into<String>,
    {
        WakachiError::FileProcessing {
            kind,
            path: path.as_ref().to_path_buf(),
            message: message.into(),
            remediation: kind.default_remediation().map(str::to_string),
            source: None,
        }
    }

    /// Create a new file processing error from an I/O error.
    pub fn file_io<P: AsRef<Path>>(kind: FileErrorKind, path: P, source: std::io::Error) -> Self {
        WakachiError::FileProcessing {
            kind,
            path: path.as_ref().to_path_buf(),
            message: source.to_string(),
            remediation: kind.default_remediation().map(str::to_string),
            source: Some(source),
        }
    }

    /// Create a new tokenization error.
    pub fn tokenization<S: Into<String>>(kind: TokenizationErrorKind, message: S) -> Self {
        WakachiError::Tokenization {
            kind,
            message: message.into(),
            span: None,
            remediation: None,
        }
    }

    /// Create a tokenization error for a segment the analyzer failed on.
    pub fn segment_failed(span: FailedSpan) -> Self {
        WakachiError::Tokenization {
            kind: TokenizationErrorKind::SegmentFailed,
            message: format!("analyzer failed on {span}"),
            span: Some(span),
            remediation: None,
        }
    }

    /// Attach or replace the remediation hint.
    pub fn with_remediation<S: Into<String>>(mut self, hint: S) -> Self {
        match &mut self {
            WakachiError::TokenizerInitialization { remediation, .. }
            | WakachiError::FileProcessing { remediation, .. }
            | WakachiError::Tokenization { remediation, .. } => {
                *remediation = Some(hint.into());
            }
        }
        self
    }

    /// The stable class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WakachiError::TokenizerInitialization { .. } => ErrorKind::TokenizerInitialization,
            WakachiError::FileProcessing { .. } => ErrorKind::FileProcessing,
            WakachiError::Tokenization { .. } => ErrorKind::Tokenization,
        }
    }

    /// The file sub-kind, for file processing errors.
    pub fn file_kind(&self) -> Option<FileErrorKind> {
        match self {
            WakachiError::FileProcessing { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The tokenization sub-kind, for tokenization errors.
    pub fn tokenization_kind(&self) -> Option<TokenizationErrorKind> {
        match self {
            WakachiError::Tokenization { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Human-actionable remediation text, where one applies.
    pub fn remediation(&self) -> Option<&str> {
        match self {
            WakachiError::TokenizerInitialization { remediation, .. }
            | WakachiError::FileProcessing { remediation, .. } => remediation.as_deref(),
            WakachiError::Tokenization {
                remediation: Some(hint),
                ..
            } => Some(hint),
            WakachiError::Tokenization { kind, .. } => match kind {
                TokenizationErrorKind::NoJapaneseContent => {
                    Some("the input must contain hiragana, katakana or kanji")
                }
                TokenizationErrorKind::SegmentFailed => {
                    Some("retry with partial processing enabled to skip failing spans")
                }
                TokenizationErrorKind::AnalyzerFailed => None,
            },
        }
    }

    /// The offending path, for file processing errors.
    pub fn path(&self) -> Option<&Path> {
        match self {
            WakachiError::FileProcessing { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The failing span, for segment failures.
    pub fn failed_span(&self) -> Option<&FailedSpan> {
        match self {
            WakachiError::Tokenization { span, .. } => span.as_ref(),
            _ => None,
        }
    }
}
