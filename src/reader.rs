/*!
 * File content reading with an ordered decode chain
 */

use std::fmt;
use std::fs;
use std::path::Path;

/// Marker line prefixed to content decoded by the latin-1 fallback
pub const LATIN1_MARKER: &str = "// Binary or non-UTF-8 file content (shown as latin-1):";
/// Rendered when no decoder accepts the bytes
pub const UNREADABLE_MARKER: &str = "// [BINARY FILE - CONTENT NOT READABLE]";
/// Content line for files that are empty or whitespace only
pub const EMPTY_MARKER: &str = "[EMPTY FILE]";

/// A single decode attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoding {
    /// Strict UTF-8
    Utf8,
    /// ISO-8859-1; accepts any byte sequence
    Latin1,
}

impl Decoding {
    /// Default chain: UTF-8 first, latin-1 as the fallback
    pub const DEFAULT_CHAIN: &'static [Decoding] = &[Decoding::Utf8, Decoding::Latin1];
    pub const STRICT_CHAIN: &'static [Decoding] = &[Decoding::Utf8];

    fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Decoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Decoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

/// Outcome of reading one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Decoded by the primary encoding
    Text(String),
    /// Decoded by the latin-1 fallback
    Latin1(String),
    /// No decoder in the chain accepted the bytes
    Unreadable,
    /// The file could not be opened or read
    Error(String),
}

impl FileContent {
    /// Whether the rendered block has nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.to_string().trim().is_empty()
    }
}

impl fmt::Display for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileContent::Text(text) => f.write_str(text),
            FileContent::Latin1(text) => write!(f, "{}\n{}", LATIN1_MARKER, text),
            FileContent::Unreadable => f.write_str(UNREADABLE_MARKER),
            FileContent::Error(msg) => write!(f, "// [ERROR READING FILE: {}]", msg),
        }
    }
}

/// Read a file and decode it with the first decoder in `chain` that succeeds.
///
/// I/O failures are returned as [`FileContent::Error`], never propagated.
pub fn read_content(path: &Path, chain: &[Decoding]) -> FileContent {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Cannot read {}: {}", path.display(), e);
            return FileContent::Error(e.to_string());
        }
    };

    for decoding in chain {
        if let Some(text) = decoding.decode(&bytes) {
            let text = normalize_newlines(text);
            return match decoding {
                Decoding::Utf8 => FileContent::Text(text),
                Decoding::Latin1 => {
                    tracing::debug!("Falling back to latin-1 for {}", path.display());
                    FileContent::Latin1(text)
                }
            };
        }
    }

    FileContent::Unreadable
}

/// Translate `\r\n` and bare `\r` to `\n`, as a text-mode read does
fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
