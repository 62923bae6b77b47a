//! Document sources: where the published table comes from.
//!
//! Only I/O failures are fatal for a run. Undecodable bytes are replaced
//! and noted, the way [`crate::decode`] notes dropped rows.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use gridcipher_diagnostics::{Diagnostic, Span, codes};

use crate::config::DecoderConfig;
use crate::decode::{Decoded, decode_html};

/// Errors raised while obtaining the source document.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The named file does not exist.
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading the document failed.
    #[error("failed to read document {name}")]
    Io {
        /// Source name (path or `<stdin>`).
        name: String,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },
}

/// A document read from a source, decoded to text.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Source name (path or `<stdin>`).
    pub name: String,
    /// Document text. Invalid UTF-8 has been replaced with U+FFFD.
    pub text: String,
    /// Notes raised while decoding the bytes, such as invalid UTF-8.
    pub diagnostics: Vec<Diagnostic>,
}

impl Document {
    /// Decode raw bytes leniently, noting the first invalid sequence.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mut diagnostics = Vec::new();
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                let at = err.utf8_error().valid_up_to();
                log::warn!("{name}: invalid UTF-8 at byte {at}, replacing");
                // The lossy text matches the input up to `at`, then holds U+FFFD.
                let span = Span::new(at, at + char::REPLACEMENT_CHARACTER.len_utf8());
                diagnostics.push(
                    Diagnostic::warn(
                        codes::INVALID_UTF8,
                        format!("document is not valid UTF-8 at byte {at}; invalid bytes replaced"),
                        Some(span),
                    )
                    .with_context(std::collections::BTreeMap::from([(
                        "byte".into(),
                        at.to_string(),
                    )])),
                );
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        log::debug!("read {} bytes from {name}", text.len());
        Self {
            name,
            text,
            diagnostics,
        }
    }

    /// Decode the document's tables, keeping the notes raised while reading it.
    pub fn decode(&self, config: &DecoderConfig) -> Decoded {
        let mut out = decode_html(&self.text, config);
        let mut diagnostics = self.diagnostics.clone();
        diagnostics.append(&mut out.diagnostics);
        out.diagnostics = diagnostics;
        out
    }
}

/// Something that can produce the bytes of a document.
pub trait DocumentSource {
    /// Name used in messages and diagnostics.
    fn name(&self) -> &str;

    /// Read the whole document as raw bytes.
    fn read_bytes(&mut self) -> Result<Vec<u8>, SourceError>;

    /// Read the whole document and decode it to text.
    fn read_document(&mut self) -> Result<Document, SourceError> {
        let bytes = self.read_bytes()?;
        Ok(Document::from_bytes(self.name(), bytes))
    }
}

/// A document stored in a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    /// Source reading from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }
}

impl DocumentSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, SourceError> {
        fs::read(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SourceError::NotFound(self.path.clone())
            } else {
                SourceError::Io {
                    name: self.name.clone(),
                    source: e,
                }
            }
        })
    }
}

/// A document read from any [`Read`] implementation, such as stdin.
pub struct ReaderSource<R> {
    reader: R,
    name: String,
}

impl<R: Read> ReaderSource<R> {
    /// Source reading from `reader`, reported as `name`.
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
        }
    }
}

impl ReaderSource<io::Stdin> {
    /// Source reading standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin(), "<stdin>")
    }
}

impl<R: Read> DocumentSource for ReaderSource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, SourceError> {
        let mut bytes = Vec::new();
        self.reader
            .read_to_end(&mut bytes)
            .map_err(|source| SourceError::Io {
                name: self.name.clone(),
                source,
            })?;
        Ok(bytes)
    }
}

/// Read a document from `source` and decode its tables.
///
/// Only I/O failures are errors. An empty document, or one with no usable
/// rows, decodes to an empty grid.
pub fn decode_document(
    source: &mut dyn DocumentSource,
    config: &DecoderConfig,
) -> Result<Decoded, SourceError> {
    Ok(source.read_document()?.decode(config))
}
