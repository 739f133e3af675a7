//! Script-based detection of Japanese text.
//!
//! Characters are sorted into hiragana, katakana, kanji or other. Text with no
//! Japanese-script characters classifies as [`Classification::NonJapanese`].
//! Text with Japanese characters classifies as [`Classification::Mixed`] only
//! when foreign-script letters make up more than a threshold share of the
//! letters. Digits, punctuation, symbols and whitespace are neutral, so
//! Japanese prose with incidental ASCII numerals stays
//! [`Classification::AllJapanese`].
//!
//! Classification never fails. Rejecting text is left to the caller.
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::script::{classify, contains_japanese, Classification};
//!
//! assert_eq!(classify(""), Classification::NonJapanese);
//! assert_eq!(classify("こんにちは"), Classification::AllJapanese);
//! assert_eq!(classify("Hello こんにちは"), Classification::Mixed);
//! assert_eq!(classify("Hello world"), Classification::NonJapanese);
//! assert!(contains_japanese("2024年"));
//! ```

use serde::{Deserialize, Serialize};

/// Share of foreign-script letters (among all letters) above which text with
/// Japanese characters is classified as mixed.
pub const MIXED_SCRIPT_THRESHOLD: f32 = 0.2;

/// Script of a single character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    /// Hiragana.
    Hiragana,
    /// Katakana, including half-width katakana and the prolonged sound mark.
    Katakana,
    /// CJK ideographs and the ideographic iteration mark.
    Kanji,
    /// Anything else.
    Other,
}

impl Script {
    /// Classify one character.
    pub fn of(c: char) -> Script {
        match c {
            '\u{3041}'..='\u{309F}' | '\u{1B001}'..='\u{1B11F}' => Script::Hiragana,
            '\u{30A0}' | '\u{30FB}' => Script::Other, // ゠ ・
            '\u{30A1}'..='\u{30FF}' |  // Katakana
            '\u{31F0}'..='\u{31FF}' |  // Katakana Phonetic Extensions
            '\u{FF66}'..='\u{FF9F}' |  // Half-width Katakana
            '\u{1B000}' => Script::Katakana,
            '\u{4E00}'..='\u{9FFF}' |   // CJK Unified Ideographs
            '\u{3400}'..='\u{4DBF}' |   // CJK Extension A
            '\u{F900}'..='\u{FAFF}' |   // CJK Compatibility Ideographs
            '\u{20000}'..='\u{2A6DF}' | // CJK Extension B
            '\u{2A700}'..='\u{2EBEF}' | // CJK Extensions C-F
            '\u{30000}'..='\u{3134F}' | // CJK Extension G
            '\u{3005}' | '\u{3007}' | '\u{303B}' => Script::Kanji, // 々 〇 〻
            _ => Script::Other,
        }
    }

    /// Whether this is one of the Japanese scripts.
    pub fn is_japanese(self) -> bool {
        !matches!(self, Script::Other)
    }
}

/// Whether an `Other` character is a letter of a foreign script.
///
/// Full-width Latin letters are typographic variants used inside Japanese text
/// and count as neutral.
fn is_foreign_letter(c: char) -> bool {
    c.is_alphabetic() && !matches!(c, '\u{FF01}'..='\u{FF5E}')
}

/// Result of classifying a piece of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Japanese text, possibly with neutral characters or a few foreign letters.
    AllJapanese,
    /// Japanese text alongside a non-trivial share of foreign-script letters.
    Mixed,
    /// No hiragana, katakana or kanji at all.
    NonJapanese,
}

/// Per-script character counts for a piece of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStats {
    pub hiragana: usize,
    pub katakana: usize,
    pub kanji: usize,
    /// Letters of non-Japanese scripts (Latin, Hangul, Cyrillic, ...).
    pub foreign: usize,
    /// Digits, punctuation, symbols and whitespace.
    pub neutral: usize,
}

impl ScriptStats {
    /// Count the characters of `text` by script.
    pub fn from_text(text: &str) -> Self {
        let mut stats = ScriptStats::default();
        for c in text.chars() {
            match Script::of(c) {
                Script::Hiragana => stats.hiragana += 1,
                Script::Katakana => stats.katakana += 1,
                Script::Kanji => stats.kanji += 1,
                Script::Other if is_foreign_letter(c) => stats.foreign += 1,
                Script::Other => stats.neutral += 1,
            }
        }
        stats
    }

    /// Number of hiragana, katakana and kanji characters.
    pub fn japanese(&self) -> usize {
        self.hiragana + self.katakana + self.kanji
    }

    /// Number of characters counted.
    pub fn total(&self) -> usize {
        self.japanese() + self.foreign + self.neutral
    }

    /// Foreign letters as a share of all letters, `0.0` when there are none.
    pub fn foreign_ratio(&self) -> f32 {
        let letters = self.japanese() + self.foreign;
        if letters == 0 {
            0.0
        } else {
            self.foreign as f32 / letters as f32
        }
    }

    /// Classify using the given mixed-script threshold.
    pub fn classification(&self, threshold: f32) -> Classification {
        if self.japanese() == 0 {
            Classification::NonJapanese
        } else if self.foreign_ratio() > threshold {
            Classification::Mixed
        } else {
            Classification::AllJapanese
        }
    }
}

/// Classify text with the default [`MIXED_SCRIPT_THRESHOLD`].
pub fn classify(text: &str) -> Classification {
    classify_with_threshold(text, MIXED_SCRIPT_THRESHOLD)
}

/// Classify text with a custom mixed-script threshold.
pub fn classify_with_threshold(text: &str, threshold: f32) -> Classification {
    ScriptStats::from_text(text).classification(threshold)
}

/// Whether the text contains at least one hiragana, katakana or kanji character.
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(|c| Script::of(c).is_japanese())
}
