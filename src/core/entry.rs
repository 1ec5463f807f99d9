//! Normalized entry model shared by the loader, classifier and emitters.

use serde::{Deserialize, Serialize};

/// Fallback display label for entries without a `Description`.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Address kinds an entry can be classified into
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind
{
    /// Module-relative address followed by a dereference chain
    Pointer,

    /// Offset from the caller's base address followed by a dereference chain
    Offset,

    /// Named group of flat constants
    Namespace,

    /// Bare constant, passed through verbatim
    Direct,

    /// No address at all; never emitted
    Unknown,
}

impl std::fmt::Display for EntryKind
{
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result
    {
        f.pad(match self
        {
            EntryKind::Pointer => "pointer",
            EntryKind::Offset => "offset",
            EntryKind::Namespace => "namespace",
            EntryKind::Direct => "direct",
            EntryKind::Unknown => "unknown",
        })
    }
}

/// A classified table entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry
{
    /// Display label as authored, surrounding quotes removed
    pub name: String,

    /// Unparsed address expression
    pub raw_address: Option<String>,

    pub kind: EntryKind,

    /// Module file name (quotes stripped), only for `Pointer`
    pub module: Option<String>,

    /// Hex portion after the module or leading `+`; verbatim for `Direct`
    pub base_offset: Option<String>,

    /// Offsets applied after each dereference, in table order
    pub dereference_chain: Vec<String>,

    /// Members of a `Namespace`
    pub children: Vec<SubEntry>,

    /// Declared value type unless it is an assembler script
    pub variable_type: Option<String>,
}

impl Entry
{
    /// Module name without its file extension, e.g. `Game` for `Game.exe`.
    pub fn module_stem(&self) -> Option<&str>
    {
        self.module
            .as_deref()
            .map(|m| m.split('.').next().unwrap_or(m))
    }
}

/// Flat namespace member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubEntry
{
    pub name: String,
    pub address: String,
}

/// Fields pulled out of one `CheatEntry` node before classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry
{
    pub description: Option<String>,
    pub address: Option<String>,
    pub variable_type: Option<String>,
    pub offsets: Vec<String>,
    pub children: Vec<RawChild>,
}

/// Direct `CheatEntries/CheatEntry` child of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChild
{
    pub description: Option<String>,
    pub address: Option<String>,
}

/// Remove surrounding quote characters from a label or module name.
pub fn unquote(s: &str) -> &str
{
    s.trim_matches(|c| c == '"' || c == '\'')
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn module_stem_drops_extension()
    {
        let entry = Entry {
            name: "hp".into(),
            raw_address: None,
            kind: EntryKind::Pointer,
            module: Some("Game.exe".into()),
            base_offset: None,
            dereference_chain: vec![],
            children: vec![],
            variable_type: None,
        };
        assert_eq!(entry.module_stem(), Some("Game"));
    }

    #[test]
    fn unquote_handles_both_quote_styles()
    {
        assert_eq!(unquote("\"Game.exe\""), "Game.exe");
        assert_eq!(unquote("'Game.exe'"), "Game.exe");
        assert_eq!(unquote("Game.exe"), "Game.exe");
    }
}
