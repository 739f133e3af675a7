//! Japanese tokenizer built on a morphological analyzer.
//!
//! [`JapaneseTokenizer`] owns an analyzer handle, the active
//! [`TokenizationMode`] and the dictionary identity. It validates input, drives
//! the analyzer, maps raw segments into [`Token`]s with character positions and
//! reclassifies analyzer failures into [`WakachiError`].
//!
//! Per call:
//!
//! 1. Input that is empty after trimming yields no tokens.
//! 2. The analyzer is initialized if that was deferred. A failed initialization
//!    is reported on every call without retrying.
//! 3. Input without hiragana, katakana or kanji is rejected.
//! 4. The analyzer segments the text. Segments it fails on abort the call, or
//!    are recorded as [`SkippedSpan`]s when partial processing is enabled.
//! 5. Registered filters run in order.
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::analyzer::mock::MockAnalyzer;
//! use wakachi::analysis::tokenizer::JapaneseTokenizer;
//! use wakachi::config::{TokenizationMode, TokenizerConfig};
//!
//! let mut tokenizer =
//!     JapaneseTokenizer::with_analyzer(MockAnalyzer::with_default_lexicon(), TokenizerConfig::default())?;
//!
//! let tokens = tokenizer.tokenize_text("昨日ラーメンを食べた")?;
//! let lemmas: Vec<&str> = tokens.iter().map(|t| t.dictionary_form()).collect();
//! assert_eq!(lemmas, vec!["昨日", "ラーメン", "を", "食べる", "た"]);
//!
//! tokenizer.set_mode(TokenizationMode::Long);
//! assert_eq!(tokenizer.tokenize_text("国家公務員")?.len(), 1);
//! # Ok::<(), wakachi::error::WakachiError>(())
//! ```

use std::path::Path;
use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::analysis::analyzer::{AnalyzerError, MorphologicalAnalyzer, RawSegment};
use crate::analysis::script::{self, Classification};
use crate::analysis::token::{SkippedSpan, Token, TokenizeOutput};
use crate::analysis::token_filter::TokenFilter;
use crate::config::{DictionaryKind, TokenizationMode, TokenizeOptions, TokenizerConfig};
use crate::error::{FailedSpan, Result, TokenizationErrorKind, WakachiError};
use crate::input::read_japanese_file;

#[cfg(feature = "lindera")]
use crate::analysis::analyzer::lindera::LinderaAnalyzer;

/// Analyzer placeholder for POS and feature values it has no data for.
const PLACEHOLDER: &str = "*";

enum AnalyzerState<H> {
    Pending,
    Ready(H),
    Failed(AnalyzerError),
}

/// Tokenizer for Japanese text.
///
/// A handle is not shared between threads. For parallel work, build one
/// tokenizer per worker.
pub struct JapaneseTokenizer<A: MorphologicalAnalyzer> {
    analyzer: A,
    state: AnalyzerState<A::Handle>,
    config: TokenizerConfig,
    filters: Vec<Arc<dyn TokenFilter>>,
}

#[cfg(feature = "lindera")]
impl JapaneseTokenizer<LinderaAnalyzer> {
    /// Create a tokenizer backed by Lindera.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        Self::with_analyzer(LinderaAnalyzer::new(), config)
    }
}

impl<A: MorphologicalAnalyzer> JapaneseTokenizer<A> {
    /// Create a tokenizer that drives `analyzer`.
    ///
    /// Unless `config.lazy_init` is set the analyzer is initialized here, and a
    /// failure is returned as a [`WakachiError::TokenizerInitialization`].
    pub fn with_analyzer(analyzer: A, config: TokenizerConfig) -> Result<Self> {
        let mut tokenizer = JapaneseTokenizer {
            analyzer,
            state: AnalyzerState::Pending,
            config,
            filters: Vec::new(),
        };
        if !tokenizer.config.lazy_init {
            Self::ready_handle(&mut tokenizer.state, &tokenizer.analyzer, &tokenizer.config)?;
        }
        Ok(tokenizer)
    }

    /// Register a filter that runs after segmentation.
    pub fn add_filter(&mut self, filter: Arc<dyn TokenFilter>) -> &mut Self {
        self.filters.push(filter);
        self
    }

    /// Get the filters applied by this tokenizer.
    pub fn filters(&self) -> &[Arc<dyn TokenFilter>] {
        &self.filters
    }

    /// Change the granularity used from the next call on.
    pub fn set_mode(&mut self, mode: TokenizationMode) {
        if self.config.mode != mode {
            debug!("Tokenization mode changed from {} to {}", self.config.mode, mode);
        }
        self.config.mode = mode;
    }

    /// The active granularity.
    pub fn mode(&self) -> TokenizationMode {
        self.config.mode
    }

    /// The dictionary this tokenizer was configured with.
    pub fn dictionary(&self) -> DictionaryKind {
        self.config.dictionary
    }

    /// Whether the analyzer has been successfully initialized.
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, AnalyzerState::Ready(_))
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Classify `text` with this tokenizer's mixed-script threshold.
    pub fn classify(&self, text: &str) -> Classification {
        script::classify_with_threshold(text, self.config.mixed_script_threshold)
    }

    /// Tokenize text, failing on the first segment the analyzer cannot handle.
    pub fn tokenize_text(&mut self, text: &str) -> Result<Vec<Token>> {
        self.tokenize_text_with_options(text, TokenizeOptions::default())
            .map(TokenizeOutput::into_tokens)
    }

    /// Tokenize text with per-call options.
    pub fn tokenize_text_with_options(
        &mut self,
        text: &str,
        options: TokenizeOptions,
    ) -> Result<TokenizeOutput> {
        if text.trim().is_empty() {
            return Ok(TokenizeOutput::default());
        }

        let mode = self.config.mode;
        let handle = Self::ready_handle(&mut self.state, &self.analyzer, &self.config)?;

        if !script::contains_japanese(text) {
            return Err(WakachiError::tokenization(
                TokenizationErrorKind::NoJapaneseContent,
                "input contains no hiragana, katakana or kanji",
            ));
        }

        let outcomes = self.analyzer.segment(handle, text, mode).map_err(|e| {
            let err = WakachiError::tokenization(TokenizationErrorKind::AnalyzerFailed, e.message);
            match e.remediation {
                Some(hint) => err.with_remediation(hint),
                None => err,
            }
        })?;

        let mut output = TokenizeOutput::default();
        let mut cursor = Cursor::default();
        for outcome in outcomes {
            let (surface, byte_offset, mut mapped) = match outcome {
                Ok(segment) => (segment.surface.clone(), segment.byte_offset, Ok(segment)),
                Err(f) => (f.surface, f.byte_offset, Err(f.reason)),
            };

            let position = match cursor.locate(text, &surface, byte_offset) {
                Ok(position) => position,
                Err(reason) => {
                    if mapped.is_ok() {
                        mapped = Err(reason);
                    }
                    cursor.chars
                }
            };

            match mapped {
                Ok(segment) => output.tokens.push(Self::to_token(segment, position)),
                Err(reason) => {
                    let span = FailedSpan {
                        surface,
                        position,
                        reason,
                    };
                    if !options.partial_ok {
                        return Err(WakachiError::segment_failed(span));
                    }
                    warn!("Skipping segment {span}");
                    output.skipped.push(SkippedSpan::from(span));
                }
            }
        }

        for filter in &self.filters {
            output.tokens = filter.filter(output.tokens);
        }

        debug!(
            "Tokenized {} characters into {} tokens ({} skipped, mode {}, {:?})",
            text.chars().count(),
            output.tokens.len(),
            output.skipped.len(),
            mode,
            self.classify(text),
        );
        Ok(output)
    }

    /// Read a file and tokenize its contents.
    pub fn tokenize_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<Token>> {
        self.tokenize_file_with_options(path, TokenizeOptions::default())
            .map(TokenizeOutput::into_tokens)
    }

    /// Read a file and tokenize its contents with per-call options.
    pub fn tokenize_file_with_options<P: AsRef<Path>>(
        &mut self,
        path: P,
        options: TokenizeOptions,
    ) -> Result<TokenizeOutput> {
        let text = read_japanese_file(path.as_ref())?;
        self.tokenize_text_with_options(&text, options)
    }

    /// Initialize the analyzer if needed and return its handle.
    fn ready_handle<'s>(
        state: &'s mut AnalyzerState<A::Handle>,
        analyzer: &A,
        config: &TokenizerConfig,
    ) -> Result<&'s mut A::Handle> {
        if let AnalyzerState::Pending = state {
            *state = match analyzer.initialize(config.dictionary, config.mode) {
                Ok(handle) => {
                    info!(
                        "Initialized {} analyzer (dictionary: {}, mode: {}, lazy: {})",
                        analyzer.name(),
                        config.dictionary,
                        config.mode,
                        config.lazy_init
                    );
                    AnalyzerState::Ready(handle)
                }
                Err(e) => {
                    error!(
                        "Failed to initialize {} analyzer with dictionary {}: {}",
                        analyzer.name(),
                        config.dictionary,
                        e
                    );
                    AnalyzerState::Failed(e)
                }
            };
        }

        match state {
            AnalyzerState::Ready(handle) => Ok(handle),
            AnalyzerState::Failed(e) => {
                let err = WakachiError::initialization(config.dictionary.name(), e.message.clone());
                Err(match &e.remediation {
                    Some(hint) => err.with_remediation(hint.clone()),
                    None => err,
                })
            }
            AnalyzerState::Pending => Err(WakachiError::initialization(
                config.dictionary.name(),
                "analyzer was not initialized",
            )),
        }
    }

    fn to_token(segment: RawSegment, position: usize) -> Token {
        let present = |value: Option<String>| value.filter(|v| v != PLACEHOLDER).unwrap_or_default();

        let part_of_speech: Vec<String> = segment
            .part_of_speech
            .into_iter()
            .filter(|tag| !tag.is_empty() && tag != PLACEHOLDER)
            .collect();
        let coarse = part_of_speech.first().cloned().unwrap_or_default();
        let features = part_of_speech.into_iter().chain(
            segment
                .features
                .into_iter()
                .filter(|f| !f.is_empty() && f != PLACEHOLDER),
        );

        Token::new(segment.surface, position)
            .with_reading(present(segment.reading))
            .with_part_of_speech(coarse)
            .with_base_form(present(segment.base_form))
            .with_normalized_form(present(segment.normalized_form))
            .with_features(features)
    }
}

/// Tracks how far into the input segments have been placed.
#[derive(Default)]
struct Cursor {
    /// Byte offset just past the last placed segment.
    bytes: usize,
    /// Character offset matching `bytes`.
    chars: usize,
}

impl Cursor {
    /// Find where `surface` starts and advance past it.
    ///
    /// A reported byte offset must point at `surface` in `text`. Without one,
    /// `surface` is searched for from the cursor on, skipping any gap the
    /// analyzer left out (whitespace). Returns the character position.
    fn locate(
        &mut self,
        text: &str,
        surface: &str,
        byte_offset: Option<usize>,
    ) -> std::result::Result<usize, String> {
        if surface.is_empty() {
            return Err("analyzer reported an empty segment".to_string());
        }

        let start = match byte_offset {
            Some(offset) => {
                let reported = offset
                    .checked_add(surface.len())
                    .and_then(|end| text.get(offset..end));
                if reported != Some(surface) {
                    return Err(format!(
                        "reported byte offset {offset} does not match the input"
                    ));
                }
                offset
            }
            None => text
                .get(self.bytes..)
                .and_then(|rest| rest.find(surface))
                .map(|i| self.bytes + i)
                .ok_or_else(|| "segment not found in the input".to_string())?,
        };
        if start < self.bytes {
            return Err(format!(
                "segment at byte {start} overlaps the previous segment"
            ));
        }

        let position = self.chars + text[self.bytes..start].chars().count();
        self.bytes = start + surface.len();
        self.chars = position + surface.chars().count();
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::mock::MockAnalyzer;
    use crate::analysis::token_filter::particle::ParticleFilter;
    use crate::analysis::analyzer::SegmentOutcome;
    use crate::error::ErrorKind;

    /// Replays a fixed segmentation result for every call.
    struct ScriptedAnalyzer {
        result: std::result::Result<Vec<SegmentOutcome>, AnalyzerError>,
    }

    impl MorphologicalAnalyzer for ScriptedAnalyzer {
        type Handle = ();

        fn initialize(
            &self,
            _: DictionaryKind,
            _: TokenizationMode,
        ) -> std::result::Result<(), AnalyzerError> {
            Ok(())
        }

        fn segment(
            &self,
            _: &mut (),
            _: &str,
            _: TokenizationMode,
        ) -> std::result::Result<Vec<SegmentOutcome>, AnalyzerError> {
            self.result.clone()
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn scripted(
        result: std::result::Result<Vec<SegmentOutcome>, AnalyzerError>,
    ) -> JapaneseTokenizer<ScriptedAnalyzer> {
        JapaneseTokenizer::with_analyzer(ScriptedAnalyzer { result }, TokenizerConfig::default())
            .unwrap()
    }

    fn tokenizer(analyzer: MockAnalyzer) -> JapaneseTokenizer<MockAnalyzer> {
        JapaneseTokenizer::with_analyzer(analyzer, TokenizerConfig::default()).unwrap()
    }

    fn surfaces(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.surface.as_str()).collect()
    }

    #[test]
    fn test_tokenize_text() {
        let mut tokenizer = tokenizer(MockAnalyzer::with_default_lexicon());
        let tokens = tokenizer.tokenize_text("私はコーヒーを飲みます").unwrap();

        assert_eq!(surfaces(&tokens), vec!["私", "は", "コーヒー", "を", "飲み", "ます"]);
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 6, 7, 9]);
        assert_eq!(tokens[4].dictionary_form(), "飲む");
        assert_eq!(tokens[4].reading, "ノミ");
        assert_eq!(tokens[4].part_of_speech, "動詞");
        assert_eq!(tokens[4].features, vec!["動詞", "一般"]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        let mut tokenizer = tokenizer(MockAnalyzer::with_default_lexicon());

        assert!(tokenizer.tokenize_text("").unwrap().is_empty());
        assert!(tokenizer.tokenize_text(" \n\t　").unwrap().is_empty());
        assert_eq!(tokenizer.analyzer().segment_count(), 0);
    }

    #[test]
    fn test_non_japanese_input_is_rejected() {
        let mut tokenizer = tokenizer(MockAnalyzer::with_default_lexicon());
        let err = tokenizer.tokenize_text("Hello world").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Tokenization);
        assert_eq!(
            err.tokenization_kind(),
            Some(TokenizationErrorKind::NoJapaneseContent)
        );

        let err = tokenizer.tokenize_text("A・B").unwrap_err();
        assert_eq!(
            err.tokenization_kind(),
            Some(TokenizationErrorKind::NoJapaneseContent)
        );
        assert_eq!(tokenizer.analyzer().segment_count(), 0);
    }

    #[test]
    fn test_positions_without_offsets() {
        let mut tokenizer = tokenizer(MockAnalyzer::with_default_lexicon().without_offsets());
        let tokens = tokenizer.tokenize_text("今日は 良い 天気").unwrap();

        assert_eq!(surfaces(&tokens), vec!["今日", "は", "良い", "天気"]);
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 2, 4, 7]);
    }

    #[test]
    fn test_eager_initialization_failure() {
        let analyzer = MockAnalyzer::with_default_lexicon().without_dictionary(DictionaryKind::Full);
        let err = JapaneseTokenizer::with_analyzer(analyzer, TokenizerConfig::default())
            .err()
            .unwrap();

        assert_eq!(err.kind(), ErrorKind::TokenizerInitialization);
        assert!(err.to_string().contains("'full'"));
        assert!(err.remediation().is_some());
    }

    #[test]
    fn test_lazy_initialization() {
        let config = TokenizerConfig::default().lazy(true);
        let mut tokenizer =
            JapaneseTokenizer::with_analyzer(MockAnalyzer::with_default_lexicon(), config).unwrap();

        assert!(!tokenizer.is_initialized());
        assert_eq!(tokenizer.analyzer().init_count(), 0);

        tokenizer.tokenize_text("天気").unwrap();
        tokenizer.tokenize_text("元気").unwrap();

        assert!(tokenizer.is_initialized());
        assert_eq!(tokenizer.analyzer().init_count(), 1);
    }

    #[test]
    fn test_failed_lazy_initialization_is_not_retried() {
        let analyzer = MockAnalyzer::with_default_lexicon().without_dictionary(DictionaryKind::Core);
        let config = TokenizerConfig::default()
            .with_dictionary(DictionaryKind::Core)
            .lazy(true);
        let mut tokenizer = JapaneseTokenizer::with_analyzer(analyzer, config).unwrap();

        for _ in 0..3 {
            let err = tokenizer.tokenize_text("天気").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TokenizerInitialization);
        }
        assert_eq!(tokenizer.analyzer().init_count(), 1);
        assert_eq!(tokenizer.analyzer().segment_count(), 0);
        assert!(!tokenizer.is_initialized());
    }

    #[test]
    fn test_segment_failure_strict_and_partial() {
        let analyzer = MockAnalyzer::with_default_lexicon().failing_on("天気");
        let mut tokenizer = tokenizer(analyzer);

        let err = tokenizer.tokenize_text("今日は天気です").unwrap_err();
        assert_eq!(
            err.tokenization_kind(),
            Some(TokenizationErrorKind::SegmentFailed)
        );
        let span = err.failed_span().unwrap();
        assert_eq!(span.surface, "天気");
        assert_eq!(span.position, 3);

        let output = tokenizer
            .tokenize_text_with_options("今日は天気です", TokenizeOptions::partial())
            .unwrap();
        assert_eq!(surfaces(&output.tokens), vec!["今日", "は", "です"]);
        assert_eq!(output.tokens[2].position, 5);
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].surface, "天気");
        assert_eq!(output.skipped[0].position, 3);
    }

    #[test]
    fn test_whole_call_failure() {
        let analyzer = MockAnalyzer::with_default_lexicon().failing_calls("engine crashed");
        let mut tokenizer = tokenizer(analyzer);

        let err = tokenizer
            .tokenize_text_with_options("天気", TokenizeOptions::partial())
            .unwrap_err();
        assert_eq!(
            err.tokenization_kind(),
            Some(TokenizationErrorKind::AnalyzerFailed)
        );
        assert!(err.to_string().contains("engine crashed"));
    }

    #[test]
    fn test_out_of_range_offset_is_skipped() {
        let mut tokenizer = scripted(Ok(vec![
            Ok(RawSegment::new("猫").at(usize::MAX)),
            Ok(RawSegment::new("が").at(3)),
        ]));

        let output = tokenizer
            .tokenize_text_with_options("猫が", TokenizeOptions::partial())
            .unwrap();
        assert_eq!(surfaces(&output.tokens), vec!["が"]);
        assert_eq!(output.tokens[0].position, 1);
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].surface, "猫");
        assert!(output.skipped[0].reason.contains("does not match"));

        let err = tokenizer.tokenize_text("猫が").unwrap_err();
        assert_eq!(
            err.tokenization_kind(),
            Some(TokenizationErrorKind::SegmentFailed)
        );
    }

    #[test]
    fn test_whole_call_failure_keeps_analyzer_hint() {
        let mut tokenizer = scripted(Err(
            AnalyzerError::new("engine crashed").with_remediation("reinstall the engine")
        ));

        let err = tokenizer.tokenize_text("天気").unwrap_err();
        assert_eq!(
            err.tokenization_kind(),
            Some(TokenizationErrorKind::AnalyzerFailed)
        );
        assert_eq!(err.remediation(), Some("reinstall the engine"));
        assert_eq!(
            err.to_string(),
            "Tokenization error (analyzer failed): engine crashed"
        );
    }

    #[test]
    fn test_mode_switch_takes_effect_next_call() {
        let mut tokenizer = tokenizer(MockAnalyzer::with_default_lexicon());

        let medium = tokenizer.tokenize_text("国家公務員").unwrap();
        tokenizer.set_mode(TokenizationMode::Short);
        let short = tokenizer.tokenize_text("国家公務員").unwrap();
        tokenizer.set_mode(TokenizationMode::Long);
        let long = tokenizer.tokenize_text("国家公務員").unwrap();

        assert_eq!(surfaces(&medium), vec!["国家", "公務員"]);
        assert_eq!(surfaces(&short), vec!["国家", "公務", "員"]);
        assert_eq!(surfaces(&long), vec!["国家公務員"]);
        assert_eq!(tokenizer.mode(), TokenizationMode::Long);
        assert_eq!(tokenizer.analyzer().init_count(), 1);
    }

    #[test]
    fn test_filters_run_in_order() {
        let mut tokenizer = tokenizer(MockAnalyzer::with_default_lexicon());
        tokenizer.add_filter(Arc::new(ParticleFilter::new()));

        let tokens = tokenizer.tokenize_text("私はコーヒーを飲みます").unwrap();
        assert_eq!(surfaces(&tokens), vec!["私", "コーヒー", "飲み", "ます"]);
        assert_eq!(tokenizer.filters().len(), 1);
    }

    #[test]
    fn test_placeholders_are_dropped() {
        let segment = RawSegment::new("猫")
            .with_reading("*")
            .with_part_of_speech(["*", "名詞", "*"])
            .with_features(["*", "一般"]);
        let token = JapaneseTokenizer::<MockAnalyzer>::to_token(segment, 4);

        assert_eq!(token.part_of_speech, "名詞");
        assert_eq!(token.reading, "");
        assert_eq!(token.features, vec!["名詞", "一般"]);
        assert_eq!(token.position, 4);
    }

    #[test]
    fn test_cursor_rejects_bad_offsets() {
        let text = "猫が鳴く";

        let mut cursor = Cursor::default();
        assert!(cursor.locate(text, "猫", Some(1)).is_err());
        assert!(cursor.locate(text, "", None).is_err());
        assert!(cursor.locate(text, "犬", None).is_err());
        assert!(cursor.locate(text, "猫", Some(usize::MAX)).is_err());

        assert_eq!(cursor.locate(text, "猫", Some(0)), Ok(0));
        assert!(cursor.locate(text, "猫", Some(0)).is_err());
        assert_eq!(cursor.locate(text, "鳴く", None), Ok(2));
    }

    #[test]
    fn test_accessors() {
        let config = TokenizerConfig::default()
            .with_mode(TokenizationMode::Short)
            .with_dictionary(DictionaryKind::Core);
        let tokenizer =
            JapaneseTokenizer::with_analyzer(MockAnalyzer::with_default_lexicon(), config).unwrap();

        assert_eq!(tokenizer.mode(), TokenizationMode::Short);
        assert_eq!(tokenizer.dictionary(), DictionaryKind::Core);
        assert!(tokenizer.is_initialized());
        assert_eq!(tokenizer.classify("Hello こんにちは"), Classification::Mixed);
    }
}
