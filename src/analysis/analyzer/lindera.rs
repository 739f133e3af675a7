//! Lindera-backed morphological analyzer.
//!
//! Dictionaries are resolved by name: [`DictionaryKind::Core`] loads IPADIC and
//! [`DictionaryKind::Full`] loads UniDic. Both are looked up as
//! `embedded://ipadic` / `embedded://unidic` unless another URI is configured,
//! so a build without the matching `embedded-*` feature needs an explicit
//! dictionary path.
//!
//! Granularity:
//!
//! - `Short` runs Lindera in decompose mode, which splits long compounds.
//! - `Medium` runs Lindera in normal mode.
//! - `Long` runs normal mode and merges adjacent noun, prefix and suffix
//!   morphemes into one compound unit.

use std::borrow::Cow;

use ahash::AHashMap;
use lindera::dictionary::load_dictionary;
use lindera::mode::{Mode, Penalty};
use lindera::segmenter::Segmenter;

use crate::analysis::analyzer::{
    AnalyzerError, MorphologicalAnalyzer, RawSegment, SegmentFailure, SegmentOutcome,
};
use crate::config::{DictionaryKind, TokenizationMode};

/// Column layout of a dictionary's detail records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DetailLayout {
    /// Number of part-of-speech columns at the start of a record.
    pos_columns: usize,
    /// Conjugation type and form columns.
    conjugation: (usize, usize),
    base_form: usize,
    reading: usize,
    normalized_form: Option<usize>,
    /// Minimum number of columns of a well-formed record.
    min_columns: usize,
}

const IPADIC_LAYOUT: DetailLayout = DetailLayout {
    pos_columns: 4,
    conjugation: (4, 5),
    base_form: 6,
    reading: 7,
    normalized_form: None,
    min_columns: 7,
};

const UNIDIC_LAYOUT: DetailLayout = DetailLayout {
    pos_columns: 4,
    conjugation: (4, 5),
    base_form: 10,
    reading: 9,
    normalized_form: Some(7),
    min_columns: 11,
};

/// Lindera marks words missing from the dictionary with this single detail.
const UNKNOWN_DETAIL: &str = "UNK";

fn layout_for(dictionary: DictionaryKind) -> DetailLayout {
    match dictionary {
        DictionaryKind::Core => IPADIC_LAYOUT,
        DictionaryKind::Full => UNIDIC_LAYOUT,
    }
}

fn lindera_mode(mode: TokenizationMode) -> Mode {
    match mode {
        TokenizationMode::Short => Mode::Decompose(Penalty::default()),
        TokenizationMode::Medium | TokenizationMode::Long => Mode::Normal,
    }
}

/// Map a placeholder column (`*` or empty) to `None`.
fn column(details: &[&str], index: usize) -> Option<String> {
    details
        .get(index)
        .filter(|value| !value.is_empty() && **value != "*")
        .map(|value| value.to_string())
}

/// Loaded Lindera state.
pub struct LinderaHandle {
    segmenter: Segmenter,
    layout: DetailLayout,
    mode: TokenizationMode,
}

/// Morphological analyzer backed by Lindera.
#[derive(Clone, Debug)]
pub struct LinderaAnalyzer {
    uris: AHashMap<DictionaryKind, String>,
}

impl Default for LinderaAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LinderaAnalyzer {
    /// Create an analyzer using the embedded dictionaries.
    pub fn new() -> Self {
        let mut uris = AHashMap::new();
        uris.insert(DictionaryKind::Core, "embedded://ipadic".to_string());
        uris.insert(DictionaryKind::Full, "embedded://unidic".to_string());
        LinderaAnalyzer { uris }
    }

    /// Load `dictionary` from `uri` (a path or a Lindera dictionary URI) instead.
    pub fn with_dictionary_uri<S: Into<String>>(mut self, dictionary: DictionaryKind, uri: S) -> Self {
        self.uris.insert(dictionary, uri.into());
        self
    }

    /// The URI `dictionary` is loaded from.
    pub fn dictionary_uri(&self, dictionary: DictionaryKind) -> &str {
        self.uris.get(&dictionary).map(String::as_str).unwrap_or_default()
    }

    fn convert(
        text: &str,
        surface: &str,
        byte_start: usize,
        details: &[&str],
        layout: DetailLayout,
    ) -> SegmentOutcome {
        let reported = byte_start
            .checked_add(surface.len())
            .and_then(|end| text.get(byte_start..end));
        if reported != Some(surface) {
            return Err(SegmentFailure::new(
                surface,
                format!("segment does not match the input at byte {byte_start}"),
            )
            .at(byte_start));
        }

        let segment = RawSegment::new(surface).at(byte_start);
        if details.len() == 1 && details[0] == UNKNOWN_DETAIL {
            return Ok(segment.with_part_of_speech(["未知語"]));
        }
        if details.len() < layout.min_columns {
            return Err(SegmentFailure::new(
                surface,
                format!(
                    "malformed dictionary record: {} columns, expected at least {}",
                    details.len(),
                    layout.min_columns
                ),
            )
            .at(byte_start));
        }

        let mut segment = segment
            .with_part_of_speech(
                (0..layout.pos_columns).filter_map(|index| column(details, index)),
            )
            .with_features(
                [layout.conjugation.0, layout.conjugation.1]
                    .into_iter()
                    .filter_map(|index| column(details, index)),
            );
        segment.reading = column(details, layout.reading);
        segment.base_form = column(details, layout.base_form);
        segment.normalized_form = layout
            .normalized_form
            .and_then(|index| column(details, index));
        Ok(segment)
    }
}

/// Whether a morpheme can take part in a long-unit compound.
fn is_compound_part(segment: &RawSegment) -> bool {
    let coarse = segment.part_of_speech.first().map(String::as_str);
    let fine = segment.part_of_speech.get(1).map(String::as_str);
    match coarse {
        Some("名詞") => !matches!(fine, Some("代名詞" | "非自立" | "数詞" | "数")),
        Some("接頭詞" | "接頭辞" | "接尾辞") => true,
        _ => false,
    }
}

/// Merge runs of adjacent compound parts into single segments.
fn merge_compounds(outcomes: Vec<SegmentOutcome>) -> Vec<SegmentOutcome> {
    let mut merged: Vec<SegmentOutcome> = Vec::with_capacity(outcomes.len());
    let mut run: Vec<RawSegment> = Vec::new();

    fn flush(run: &mut Vec<RawSegment>, merged: &mut Vec<SegmentOutcome>) {
        if run.len() < 2 {
            merged.extend(run.drain(..).map(Ok));
            return;
        }
        let parts: Vec<RawSegment> = std::mem::take(run);
        let surface: String = parts.iter().map(|p| p.surface.as_str()).collect();
        let reading: Option<String> = parts.iter().map(|p| p.reading.as_deref()).collect();
        let mut compound = RawSegment::new(surface)
            .with_part_of_speech(["名詞", "複合"])
            .with_features(parts.iter().map(|p| p.surface.clone()));
        compound.byte_offset = parts[0].byte_offset;
        compound.reading = reading;
        merged.push(Ok(compound));
    }

    for outcome in outcomes {
        match outcome {
            Ok(segment) if is_compound_part(&segment) => {
                let contiguous = run.last().is_none_or(|last| {
                    matches!(
                        (last.byte_offset, segment.byte_offset),
                        (Some(a), Some(b)) if a.checked_add(last.surface.len()) == Some(b)
                    )
                });
                if !contiguous {
                    flush(&mut run, &mut merged);
                }
                run.push(segment);
            }
            other => {
                flush(&mut run, &mut merged);
                merged.push(other);
            }
        }
    }
    flush(&mut run, &mut merged);
    merged
}

impl MorphologicalAnalyzer for LinderaAnalyzer {
    type Handle = LinderaHandle;

    fn initialize(
        &self,
        dictionary: DictionaryKind,
        mode: TokenizationMode,
    ) -> Result<LinderaHandle, AnalyzerError> {
        let uri = self.dictionary_uri(dictionary);
        let dict = load_dictionary(uri).map_err(|e| {
            AnalyzerError::new(format!("failed to load dictionary from '{uri}': {e}"))
                .with_remediation(match dictionary {
                    DictionaryKind::Core => {
                        "build with the `embedded-ipadic` feature or configure an IPADIC path"
                    }
                    DictionaryKind::Full => {
                        "build with the `embedded-unidic` feature or configure a UniDic path"
                    }
                })
        })?;
        let segmenter = Segmenter::new(lindera_mode(mode), dict, None);

        Ok(LinderaHandle {
            segmenter,
            layout: layout_for(dictionary),
            mode,
        })
    }

    fn segment(
        &self,
        handle: &mut LinderaHandle,
        text: &str,
        mode: TokenizationMode,
    ) -> Result<Vec<SegmentOutcome>, AnalyzerError> {
        if handle.mode != mode {
            handle.segmenter.mode = lindera_mode(mode);
            handle.mode = mode;
        }

        let tokens = handle
            .segmenter
            .segment(Cow::Borrowed(text))
            .map_err(|e| AnalyzerError::new(format!("Failed to segment text: {e}")))?;

        let mut outcomes = Vec::with_capacity(tokens.len());
        for mut token in tokens {
            let surface = token.surface.to_string();
            if surface.trim().is_empty() {
                continue;
            }
            let byte_start = token.byte_start;
            let details = token.details();
            outcomes.push(Self::convert(text, &surface, byte_start, &details, handle.layout));
        }

        if mode == TokenizationMode::Long {
            outcomes = merge_compounds(outcomes);
        }
        Ok(outcomes)
    }

    fn name(&self) -> &'static str {
        "lindera"
    }
}
