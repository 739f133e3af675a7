//! Mock analyzer for testing Japanese tokenization.
//!
//! [`MockAnalyzer`] segments text by longest match against a small in-memory
//! lexicon. Compound entries carry their medium and short splits so that mode
//! handling can be exercised without a real dictionary. Failures of every kind
//! can be scripted: unavailable dictionaries, whole-call errors and per-segment
//! errors.
//!
//! Characters not covered by the lexicon are grouped into runs of the same
//! script. Whitespace is never reported as a segment.

use std::sync::atomic::{AtomicUsize, Ordering};

use ahash::{AHashMap, AHashSet};

use crate::analysis::analyzer::{
    AnalyzerError, MorphologicalAnalyzer, RawSegment, SegmentFailure, SegmentOutcome,
};
use crate::analysis::script::Script;
use crate::config::{DictionaryKind, TokenizationMode};

#[derive(Clone, Debug)]
struct MockWord {
    reading: String,
    part_of_speech: Vec<String>,
    base_form: Option<String>,
}

#[derive(Clone, Debug)]
struct MockEntry {
    word: MockWord,
    medium: Vec<String>,
    short: Vec<String>,
}

impl MockEntry {
    fn units(&self, surface: &str, mode: TokenizationMode) -> Vec<String> {
        let split: &[String] = match mode {
            TokenizationMode::Long => &[],
            TokenizationMode::Medium => &self.medium[..],
            TokenizationMode::Short if self.short.is_empty() => &self.medium[..],
            TokenizationMode::Short => &self.short[..],
        };
        if split.is_empty() {
            vec![surface.to_string()]
        } else {
            split.to_vec()
        }
    }
}

/// Loaded state of a [`MockAnalyzer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockHandle {
    /// Dictionary the handle was initialized with.
    pub dictionary: DictionaryKind,
    /// Mode the handle was initialized with.
    pub initial_mode: TokenizationMode,
}

/// A deterministic, lexicon-driven analyzer.
///
/// # Examples
///
/// ```
/// use wakachi::analysis::analyzer::mock::MockAnalyzer;
/// use wakachi::analysis::tokenizer::JapaneseTokenizer;
/// use wakachi::config::TokenizerConfig;
///
/// let analyzer = MockAnalyzer::new()
///     .word("猫", "ネコ", &["名詞", "普通名詞"], None)
///     .word("が", "ガ", &["助詞", "格助詞"], None);
///
/// let mut tokenizer = JapaneseTokenizer::with_analyzer(analyzer, TokenizerConfig::default()).unwrap();
/// let tokens = tokenizer.tokenize_text("猫が").unwrap();
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[1].position, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockAnalyzer {
    lexicon: AHashMap<String, MockEntry>,
    max_chars: usize,
    failing: AHashSet<String>,
    unavailable: AHashSet<DictionaryKind>,
    call_failure: Option<String>,
    report_offsets: bool,
    init_calls: AtomicUsize,
    segment_calls: AtomicUsize,
}

impl MockAnalyzer {
    /// Create an analyzer with an empty lexicon.
    pub fn new() -> Self {
        MockAnalyzer {
            report_offsets: true,
            ..Default::default()
        }
    }

    /// Create an analyzer with a small lexicon of everyday words and compounds.
    pub fn with_default_lexicon() -> Self {
        Self::new()
            .word("今日", "キョウ", &["名詞", "普通名詞", "副詞可能"], None)
            .word("昨日", "キノウ", &["名詞", "普通名詞", "副詞可能"], None)
            .word("天気", "テンキ", &["名詞", "普通名詞", "一般"], None)
            .word("私", "ワタシ", &["代名詞"], None)
            .word("コーヒー", "コーヒー", &["名詞", "普通名詞", "一般"], None)
            .word("ラーメン", "ラーメン", &["名詞", "普通名詞", "一般"], None)
            .word("元気", "ゲンキ", &["形状詞", "一般"], None)
            .word("良い", "ヨイ", &["形容詞", "非自立可能"], Some("良い"))
            .word("美味しい", "オイシイ", &["形容詞", "一般"], Some("美味しい"))
            .word("飲み", "ノミ", &["動詞", "一般"], Some("飲む"))
            .word("食べ", "タベ", &["動詞", "一般"], Some("食べる"))
            .word("読み", "ヨミ", &["動詞", "一般"], Some("読む"))
            .word("始め", "ハジメ", &["動詞", "非自立可能"], Some("始める"))
            .word("です", "デス", &["助動詞"], Some("です"))
            .word("ます", "マス", &["助動詞"], Some("ます"))
            .word("た", "タ", &["助動詞"], Some("た"))
            .word("は", "ハ", &["助詞", "係助詞"], None)
            .word("を", "ヲ", &["助詞", "格助詞"], None)
            .word("が", "ガ", &["助詞", "格助詞"], None)
            .word("に", "ニ", &["助詞", "格助詞"], None)
            .word("で", "デ", &["助詞", "格助詞"], None)
            .word("の", "ノ", &["助詞", "格助詞"], None)
            .word("ね", "ネ", &["助詞", "終助詞"], None)
            .word("か", "カ", &["助詞", "終助詞"], None)
            .word("こんにちは", "コンニチハ", &["感動詞", "一般"], None)
            .word("国家", "コッカ", &["名詞", "普通名詞", "一般"], None)
            .word("公務員", "コウムイン", &["名詞", "普通名詞", "一般"], None)
            .word("公務", "コウム", &["名詞", "普通名詞", "一般"], None)
            .word("員", "イン", &["接尾辞", "名詞的"], None)
            .word("選挙", "センキョ", &["名詞", "普通名詞", "サ変可能"], None)
            .word("管理", "カンリ", &["名詞", "普通名詞", "サ変可能"], None)
            .word("委員会", "イインカイ", &["名詞", "普通名詞", "一般"], None)
            .word("委員", "イイン", &["名詞", "普通名詞", "一般"], None)
            .word("会", "カイ", &["接尾辞", "名詞的"], None)
            .word("。", "", &["補助記号", "句点"], None)
            .word("、", "", &["補助記号", "読点"], None)
            .word("！", "", &["補助記号", "句点"], None)
            .word("？", "", &["補助記号", "句点"], None)
            .compound(
                "国家公務員",
                "コッカコウムイン",
                &["名詞", "普通名詞", "一般"],
                &["国家", "公務員"],
                &["国家", "公務", "員"],
            )
            .compound(
                "選挙管理委員会",
                "センキョカンリイインカイ",
                &["名詞", "固有名詞", "一般"],
                &["選挙", "管理", "委員会"],
                &["選挙", "管理", "委員", "会"],
            )
            .compound(
                "読み始め",
                "ヨミハジメ",
                &["動詞", "一般"],
                &["読み始め"],
                &["読み", "始め"],
            )
    }

    /// Add a single-unit word.
    pub fn word(
        mut self,
        surface: &str,
        reading: &str,
        part_of_speech: &[&str],
        base_form: Option<&str>,
    ) -> Self {
        self.insert(surface, reading, part_of_speech, base_form, &[], &[]);
        self
    }

    /// Add a compound with its medium and short splits.
    ///
    /// A split whose parts do not concatenate back to `surface` is ignored and
    /// the compound is reported whole in that mode.
    pub fn compound(
        mut self,
        surface: &str,
        reading: &str,
        part_of_speech: &[&str],
        medium: &[&str],
        short: &[&str],
    ) -> Self {
        self.insert(surface, reading, part_of_speech, None, medium, short);
        self
    }

    fn insert(
        &mut self,
        surface: &str,
        reading: &str,
        part_of_speech: &[&str],
        base_form: Option<&str>,
        medium: &[&str],
        short: &[&str],
    ) {
        let valid_split = |parts: &[&str]| -> Vec<String> {
            if parts.concat() == surface {
                parts.iter().map(|p| p.to_string()).collect()
            } else {
                Vec::new()
            }
        };
        let entry = MockEntry {
            word: MockWord {
                reading: reading.to_string(),
                part_of_speech: part_of_speech.iter().map(|p| p.to_string()).collect(),
                base_form: base_form.map(str::to_string),
            },
            medium: valid_split(medium),
            short: valid_split(short),
        };
        self.max_chars = self.max_chars.max(surface.chars().count());
        self.lexicon.insert(surface.to_string(), entry);
    }

    /// Report a per-segment failure whenever `surface` is segmented.
    pub fn failing_on(mut self, surface: &str) -> Self {
        self.failing.insert(surface.to_string());
        self
    }

    /// Make initialization fail for `dictionary`.
    pub fn without_dictionary(mut self, dictionary: DictionaryKind) -> Self {
        self.unavailable.insert(dictionary);
        self
    }

    /// Make every `segment` call fail as a whole.
    pub fn failing_calls<S: Into<String>>(mut self, message: S) -> Self {
        self.call_failure = Some(message.into());
        self
    }

    /// Stop reporting byte offsets, leaving positions to the caller.
    pub fn without_offsets(mut self) -> Self {
        self.report_offsets = false;
        self
    }

    /// Number of `initialize` calls so far.
    pub fn init_count(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    /// Number of `segment` calls so far.
    pub fn segment_count(&self) -> usize {
        self.segment_calls.load(Ordering::SeqCst)
    }

    fn longest_match<'t>(&self, rest: &'t str) -> Option<(&'t str, &MockEntry)> {
        let ends: Vec<usize> = rest
            .char_indices()
            .skip(1)
            .map(|(i, _)| i)
            .chain(std::iter::once(rest.len()))
            .take(self.max_chars)
            .collect();
        ends.iter().rev().find_map(|&end| {
            let candidate = &rest[..end];
            self.lexicon.get(candidate).map(|entry| (candidate, entry))
        })
    }

    /// Length in bytes of the unknown run at the start of `rest`.
    fn unknown_run(&self, rest: &str) -> usize {
        let mut chars = rest.char_indices();
        let Some((_, first)) = chars.next() else {
            return 0;
        };
        let script = Script::of(first);
        if script == Script::Other && !first.is_alphanumeric() {
            return first.len_utf8();
        }
        for (i, c) in chars {
            let same_kind = Script::of(c) == script
                && (script.is_japanese() || c.is_alphanumeric() == first.is_alphanumeric());
            if !same_kind || c.is_whitespace() || self.longest_match(&rest[i..]).is_some() {
                return i;
            }
        }
        rest.len()
    }

    fn unknown_segment(surface: &str) -> RawSegment {
        let first = surface.chars().next().unwrap_or(' ');
        let pos: &[&str] = match Script::of(first) {
            script if script.is_japanese() => &["名詞", "普通名詞", "一般"],
            _ if first.is_numeric() => &["名詞", "数詞"],
            _ if first.is_alphabetic() => &["名詞", "固有名詞", "一般"],
            _ => &["補助記号", "一般"],
        };
        RawSegment::new(surface).with_part_of_speech(pos.iter().copied())
    }

    fn outcome(&self, segment: RawSegment, offset: usize) -> SegmentOutcome {
        if self.failing.contains(&segment.surface) {
            let failure = SegmentFailure::new(segment.surface, "simulated analyzer failure");
            return Err(if self.report_offsets {
                failure.at(offset)
            } else {
                failure
            });
        }
        Ok(if self.report_offsets {
            segment.at(offset)
        } else {
            segment
        })
    }

    fn known_segment(&self, surface: &str, fallback: &MockEntry) -> RawSegment {
        let word = self
            .lexicon
            .get(surface)
            .map(|entry| &entry.word)
            .unwrap_or(&fallback.word);
        let mut segment = RawSegment::new(surface)
            .with_part_of_speech(word.part_of_speech.iter().cloned());
        if !word.reading.is_empty() {
            segment = segment.with_reading(word.reading.clone());
        }
        if let Some(base) = &word.base_form {
            segment = segment.with_base_form(base.clone());
        }
        segment
    }
}

impl MorphologicalAnalyzer for MockAnalyzer {
    type Handle = MockHandle;

    fn initialize(
        &self,
        dictionary: DictionaryKind,
        mode: TokenizationMode,
    ) -> Result<MockHandle, AnalyzerError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.contains(&dictionary) {
            return Err(
                AnalyzerError::new(format!("dictionary '{dictionary}' is not installed"))
                    .with_remediation(format!("install the '{dictionary}' mock dictionary")),
            );
        }
        Ok(MockHandle {
            dictionary,
            initial_mode: mode,
        })
    }

    fn segment(
        &self,
        _handle: &mut MockHandle,
        text: &str,
        mode: TokenizationMode,
    ) -> Result<Vec<SegmentOutcome>, AnalyzerError> {
        self.segment_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.call_failure {
            return Err(AnalyzerError::new(message.clone()));
        }

        let mut outcomes = Vec::new();
        let mut offset = 0;
        while offset < text.len() {
            let rest = &text[offset..];
            let Some(c) = rest.chars().next() else {
                break;
            };
            if c.is_whitespace() {
                offset += c.len_utf8();
                continue;
            }

            if let Some((matched, entry)) = self.longest_match(rest) {
                if self.failing.contains(matched) {
                    outcomes.push(self.outcome(RawSegment::new(matched), offset));
                } else {
                    let mut part_offset = offset;
                    for unit in entry.units(matched, mode) {
                        let segment = self.known_segment(&unit, entry);
                        outcomes.push(self.outcome(segment, part_offset));
                        part_offset += unit.len();
                    }
                }
                offset += matched.len();
            } else {
                let len = self.unknown_run(rest);
                outcomes.push(self.outcome(Self::unknown_segment(&rest[..len]), offset));
                offset += len;
            }
        }
        Ok(outcomes)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
