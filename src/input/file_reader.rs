//! File reading utilities

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{FileErrorKind, Result, WakachiError};

/// Number of leading bytes inspected by the binary check.
pub const DEFAULT_SAMPLE_SIZE: usize = 8 * 1024;

/// Share of non-text control bytes above which a sample counts as binary.
pub const DEFAULT_BINARY_RATIO: f32 = 0.3;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Whether `byte` is a control byte that does not occur in plain text.
fn is_non_text_byte(byte: u8) -> bool {
    byte < 0x20 && !matches!(byte, b'\t' | b'\n' | b'\r' | 0x0C | 0x1B)
}

fn utf16_bom(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xFE, ..] => Some("UTF-16LE"),
        [0xFE, 0xFF, ..] => Some("UTF-16BE"),
        _ => None,
    }
}

/// File reader with binary detection and strict UTF-8 validation.
///
/// Checks run in a fixed order, so each failure gets the most specific kind:
/// missing path, directory, empty file, UTF-16 byte order mark, binary
/// content, then invalid UTF-8. No Japanese-content check is made here.
#[derive(Clone, Debug)]
pub struct FileReader {
    sample_size: usize,
    binary_ratio: f32,
}

impl Default for FileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileReader {
    pub fn new() -> Self {
        FileReader {
            sample_size: DEFAULT_SAMPLE_SIZE,
            binary_ratio: DEFAULT_BINARY_RATIO,
        }
    }

    /// Set how many leading bytes the binary check inspects.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size.max(1);
        self
    }

    /// Set the share of control bytes above which a file counts as binary.
    pub fn with_binary_ratio(mut self, ratio: f32) -> Self {
        self.binary_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Whether `bytes` look like binary data.
    ///
    /// Only the first `sample_size` bytes are inspected. A NUL byte is always
    /// binary.
    pub fn is_binary(&self, bytes: &[u8]) -> bool {
        let sample = &bytes[..bytes.len().min(self.sample_size)];
        if sample.is_empty() {
            return false;
        }
        if sample.contains(&0) {
            return true;
        }
        let control = sample.iter().filter(|&&b| is_non_text_byte(b)).count();
        control as f32 / sample.len() as f32 > self.binary_ratio
    }

    /// Read a file as UTF-8 text.
    ///
    /// A leading UTF-8 byte order mark is removed.
    pub fn read_text<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();

        let metadata = fs::metadata(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WakachiError::file(
                    FileErrorKind::NotFound,
                    path,
                    format!("file does not exist: {}", path.display()),
                )
            } else {
                WakachiError::file_io(FileErrorKind::Io, path, e)
            }
        })?;
        if metadata.is_dir() {
            return Err(WakachiError::file(
                FileErrorKind::IsDirectory,
                path,
                "path is a directory, not a file",
            ));
        }

        let bytes = fs::read(path).map_err(|e| WakachiError::file_io(FileErrorKind::Io, path, e))?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        if bytes.is_empty() {
            return Err(WakachiError::file(
                FileErrorKind::Empty,
                path,
                "file contains no data",
            ));
        }
        if let Some(encoding) = utf16_bom(&bytes) {
            return Err(WakachiError::file(
                FileErrorKind::Encoding,
                path,
                format!("file starts with a {encoding} byte order mark; only UTF-8 is supported"),
            )
            .with_remediation(format!(
                "convert the file to UTF-8, e.g. `iconv -f {encoding} -t UTF-8 in.txt > out.txt`"
            )));
        }
        if self.is_binary(&bytes) {
            return Err(WakachiError::file(
                FileErrorKind::Binary,
                path,
                "file appears to be binary",
            ));
        }

        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_string()),
            Err(e) => Err(WakachiError::file(
                FileErrorKind::Encoding,
                path,
                format!(
                    "file is not valid UTF-8 (first invalid byte at offset {})",
                    e.valid_up_to()
                ),
            )),
        }
    }
}

/// Read a file as UTF-8 text with the default checks.
///
/// Accepts anything path-like: `&str`, `String`, `&Path` and `PathBuf` all
/// resolve the same way.
///
/// # Examples
///
/// ```no_run
/// use wakachi::input::read_japanese_file;
///
/// let text = read_japanese_file("novel.txt")?;
/// # Ok::<(), wakachi::error::WakachiError>(())
/// ```
pub fn read_japanese_file<P: AsRef<Path>>(path: P) -> Result<String> {
    FileReader::new().read_text(path)
}
