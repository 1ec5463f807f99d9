//! Error taxonomy for the translation engine.

use std::path::PathBuf;

/// Failures surfaced by loading, classifying and emitting a table.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError
{
    /// The input is not a well-formed XML tree; nothing is produced
    #[error("malformed document at byte {position}: {message}")]
    DocumentMalformed
    {
        position: u64,
        message: String,
    },

    /// A single entry's address has no usable module/offset shape
    #[error(transparent)]
    EntryMalformed(#[from] EntryMalformed),

    /// The language selector does not name a known emitter
    #[error("unsupported language: {0} (expected python, cpp or csharp)")]
    UnsupportedLanguage(String),

    /// Reading the table from disk failed
    #[error("failed to read {}: {source}", path.display())]
    Io
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Classification failure scoped to one entry; the rest of the table is
/// still translated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed entry {name:?} (address {address:?}): {reason}")]
pub struct EntryMalformed
{
    pub name: String,
    pub address: String,
    pub reason: String,
}

impl TranslateError
{
    pub(crate) fn malformed(
        position: u64,
        message: impl Into<String>,
    ) -> Self
    {
        Self::DocumentMalformed { position, message: message.into() }
    }
}

pub type Result<T, E = TranslateError> = std::result::Result<T, E>;
