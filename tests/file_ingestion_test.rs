//! Integration tests for reading and tokenizing files

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use wakachi::analysis::analyzer::mock::MockAnalyzer;
use wakachi::error::{ErrorKind, FileErrorKind, TokenizationErrorKind};
use wakachi::input::FileReader;
use wakachi::prelude::*;

fn tokenizer() -> JapaneseTokenizer<MockAnalyzer> {
    JapaneseTokenizer::with_analyzer(MockAnalyzer::with_default_lexicon(), TokenizerConfig::default())
        .unwrap()
}

fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn test_tokenize_file() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "diary.txt", "今日は良い天気です。\n昨日ラーメンを食べた。\n".as_bytes());

    let mut tokenizer = tokenizer();
    let tokens = tokenizer.tokenize_file(&path)?;

    assert_eq!(tokens.len(), 12);
    let ramen = tokens.iter().find(|t| t.surface == "ラーメン").unwrap();
    assert_eq!(ramen.position, 13);

    Ok(())
}

#[test]
fn test_tokenize_file_accepts_str_paths() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "note.txt", "元気ですか".as_bytes());

    let mut tokenizer = tokenizer();
    let from_path = tokenizer.tokenize_file(&path)?;
    let from_str = tokenizer.tokenize_file(path.to_str().unwrap())?;

    assert_eq!(from_path, from_str);

    Ok(())
}

#[test]
fn test_file_errors_are_classified() {
    let temp_dir = TempDir::new().unwrap();
    let empty = write(&temp_dir, "empty.txt", b"");
    let sjis = write(&temp_dir, "sjis.txt", &[0x82, 0xB1, 0x82, 0xF1, 0x82, 0xC9]);
    let binary = write(&temp_dir, "data.bin", &[0x7F, b'E', b'L', b'F', 0x02, 0x01, 0x01, 0x00]);

    let cases: Vec<(&Path, FileErrorKind)> = vec![
        (Path::new("/nonexistent/novel.txt"), FileErrorKind::NotFound),
        (temp_dir.path(), FileErrorKind::IsDirectory),
        (empty.as_path(), FileErrorKind::Empty),
        (sjis.as_path(), FileErrorKind::Encoding),
        (binary.as_path(), FileErrorKind::Binary),
    ];

    let mut tokenizer = tokenizer();
    for (path, kind) in cases {
        let err = tokenizer.tokenize_file(path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileProcessing, "{}", path.display());
        assert_eq!(err.file_kind(), Some(kind), "{}", path.display());
        assert_eq!(err.path(), Some(path));
        assert!(err.remediation().is_some());
    }

    // File errors leave the tokenizer usable
    assert!(tokenizer.tokenize_text("天気").is_ok());
}

#[test]
fn test_encoding_error_suggests_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "euc.txt", &[0xC6, 0xFC, 0xCB, 0xDC]);

    let err = read_japanese_file(&path).unwrap_err();
    let hint = err.remediation().unwrap();
    assert!(hint.contains("UTF-8"));
    assert!(hint.contains("iconv"));
}

#[test]
fn test_english_file_reads_but_does_not_tokenize() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "english.txt", b"Just some English text.\n");

    assert!(read_japanese_file(&path).is_ok());

    let err = tokenizer().tokenize_file(&path).unwrap_err();
    assert_eq!(
        err.tokenization_kind(),
        Some(TokenizationErrorKind::NoJapaneseContent)
    );
}

#[test]
fn test_whitespace_only_file_yields_no_tokens() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "blank.txt", b"\n\n   \n");

    assert!(tokenizer().tokenize_file(&path)?.is_empty());

    Ok(())
}

#[test]
fn test_tokenize_file_partial() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "menu.txt", "ラーメンとコーヒー".as_bytes());

    let analyzer = MockAnalyzer::with_default_lexicon().failing_on("と");
    let mut tokenizer = JapaneseTokenizer::with_analyzer(analyzer, TokenizerConfig::default())?;
    let output = tokenizer.tokenize_file_with_options(&path, TokenizeOptions::partial())?;

    assert_eq!(output.tokens.len(), 2);
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].position, 4);

    Ok(())
}

#[test]
fn test_large_file_with_late_nul_byte() {
    let temp_dir = TempDir::new().unwrap();
    let mut bytes = "あ".repeat(4000).into_bytes();
    bytes.push(0);
    let path = write(&temp_dir, "late_nul.txt", &bytes);

    // The NUL byte lies outside the sampled prefix
    let text = FileReader::new().read_text(&path).unwrap();
    assert!(text.ends_with('\0'));

    let err = FileReader::new()
        .with_sample_size(bytes.len())
        .read_text(&path)
        .unwrap_err();
    assert_eq!(err.file_kind(), Some(FileErrorKind::Binary));
}
