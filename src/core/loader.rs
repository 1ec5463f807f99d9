//! Streaming `.CT` loader.
//!
//! Walks the XML event stream once. Only the chain of currently open
//! `CheatEntry` nodes is held in memory; each one is classified and dropped at
//! its closing tag. Entries are reported in document (pre-)order even though a
//! parent closes after its nested children, so a slot is reserved when the
//! opening tag is seen.

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::core::classify::classify;
use crate::core::entry::{Entry, RawChild, RawEntry};
use crate::error::{EntryMalformed, Result, TranslateError};

const CHEAT_ENTRY: &[u8] = b"CheatEntry";
const CHEAT_ENTRIES: &[u8] = b"CheatEntries";
const DESCRIPTION: &[u8] = b"Description";
const ADDRESS: &[u8] = b"Address";
const VARIABLE_TYPE: &[u8] = b"VariableType";
const OFFSETS: &[u8] = b"Offsets";
const OFFSET: &[u8] = b"Offset";

/// Result of loading one table
#[derive(Debug, Default)]
pub struct LoadedTable
{
    /// Classified entries in document order
    pub entries: Vec<Entry>,

    /// Entries dropped because their address could not be classified
    pub skipped: Vec<SkippedEntry>,
}

/// Diagnostic for an entry left out of the output
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedEntry
{
    pub name: String,
    pub address: String,
    pub reason: String,
}

/// An open `CheatEntry` awaiting its closing tag.
struct OpenEntry
{
    slot: usize,
    nested: bool,
    raw: RawEntry,
}

/// Parse a cheat table from any buffered reader.
#[instrument(skip_all)]
pub fn load<R: BufRead>(reader: R) -> Result<LoadedTable>
{
    let mut xml = Reader::from_reader(reader);
    xml.config_mut()
        .check_end_names = true;

    let mut buf = Vec::new();
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut text = String::new();
    let mut saw_root = false;

    let mut open: Vec<OpenEntry> = Vec::new();
    let mut slots: Vec<Option<Entry>> = Vec::new();
    let mut skipped = Vec::new();

    loop
    {
        let event = xml
            .read_event_into(&mut buf)
            .map_err(|e| TranslateError::malformed(xml.error_position(), e.to_string()))?;

        match event
        {
            Event::Start(e) =>
            {
                if path.is_empty() && saw_root
                {
                    return Err(TranslateError::malformed(xml.buffer_position(), "multiple root elements"));
                }
                saw_root = true;
                let name = e
                    .name()
                    .as_ref()
                    .to_vec();
                if name == CHEAT_ENTRY
                {
                    open.push(open_entry(&path, &mut slots));
                }
                path.push(name);
                text.clear();
            }
            Event::Empty(e) =>
            {
                if path.is_empty() && saw_root
                {
                    return Err(TranslateError::malformed(xml.buffer_position(), "multiple root elements"));
                }
                saw_root = true;
                let name = e
                    .name()
                    .as_ref()
                    .to_vec();
                if name == CHEAT_ENTRY
                {
                    open.push(open_entry(&path, &mut slots));
                    close_entry(&mut open, &mut slots, &mut skipped);
                }
                else
                {
                    assign_field(&name, &path, "", &mut open);
                }
            }
            Event::Text(t) =>
            {
                let chunk = t
                    .unescape()
                    .map_err(|e| TranslateError::malformed(xml.buffer_position(), e.to_string()))?;
                if path.is_empty()
                {
                    reject_outside_text(&chunk, xml.buffer_position())?;
                }
                text.push_str(&chunk);
            }
            Event::CData(c) =>
            {
                let chunk = String::from_utf8_lossy(&c.into_inner()).into_owned();
                if path.is_empty()
                {
                    reject_outside_text(&chunk, xml.buffer_position())?;
                }
                text.push_str(&chunk);
            }
            Event::End(_) =>
            {
                let Some(name) = path.pop()
                else
                {
                    return Err(TranslateError::malformed(xml.buffer_position(), "unexpected closing tag"));
                };

                if name == CHEAT_ENTRY
                {
                    close_entry(&mut open, &mut slots, &mut skipped);
                }
                else
                {
                    assign_field(&name, &path, text.trim(), &mut open);
                }
                text.clear();
            }
            Event::Eof => break,
            _ =>
            {}
        }

        buf.clear();
    }

    if !saw_root
    {
        return Err(TranslateError::malformed(xml.buffer_position(), "document has no root element"));
    }
    if let Some(unclosed) = path.last()
    {
        return Err(TranslateError::malformed(
            xml.buffer_position(),
            format!("unclosed element <{}>", String::from_utf8_lossy(unclosed)),
        ));
    }

    let entries: Vec<Entry> = slots
        .into_iter()
        .flatten()
        .collect();
    debug!(entries = entries.len(), skipped = skipped.len(), "loaded table");

    Ok(LoadedTable { entries, skipped })
}

fn open_entry(
    path: &[Vec<u8>],
    slots: &mut Vec<Option<Entry>>,
) -> OpenEntry
{
    let nested = ends_with(path, &[CHEAT_ENTRY, CHEAT_ENTRIES]);
    slots.push(None);
    OpenEntry { slot: slots.len() - 1, nested, raw: RawEntry::default() }
}

fn close_entry(
    open: &mut Vec<OpenEntry>,
    slots: &mut [Option<Entry>],
    skipped: &mut Vec<SkippedEntry>,
)
{
    let Some(done) = open.pop()
    else
    {
        return;
    };

    if done.nested
        && let Some(parent) = open.last_mut()
    {
        parent
            .raw
            .children
            .push(RawChild {
                description: done
                    .raw
                    .description
                    .clone(),
                address: done
                    .raw
                    .address
                    .clone(),
            });
    }

    match classify(done.raw)
    {
        Ok(entry) => slots[done.slot] = Some(entry),
        Err(EntryMalformed { name, address, reason }) =>
        {
            warn!(%name, %address, %reason, "skipping entry");
            skipped.push(SkippedEntry { name, address, reason });
        }
    }
}

/// Only whitespace (and a byte-order mark) may sit outside the root element.
fn reject_outside_text(
    chunk: &str,
    position: u64,
) -> Result<()>
{
    if chunk
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .is_empty()
    {
        Ok(())
    }
    else
    {
        Err(TranslateError::malformed(position, "text outside the root element"))
    }
}

/// Store a closed leaf element's text on the entry that owns it.
fn assign_field(
    name: &[u8],
    parent_path: &[Vec<u8>],
    value: &str,
    open: &mut [OpenEntry],
)
{
    let Some(current) = open.last_mut()
    else
    {
        return;
    };
    let raw = &mut current.raw;

    if ends_with(parent_path, &[CHEAT_ENTRY])
    {
        match name
        {
            DESCRIPTION => raw.description = Some(value.to_string()),
            ADDRESS => raw.address = Some(value.to_string()),
            VARIABLE_TYPE => raw.variable_type = Some(value.to_string()),
            _ =>
            {}
        }
    }
    else if name == OFFSET && ends_with(parent_path, &[CHEAT_ENTRY, OFFSETS]) && !value.is_empty()
    {
        raw.offsets
            .push(value.to_string());
    }
}

fn ends_with(
    path: &[Vec<u8>],
    suffix: &[&[u8]],
) -> bool
{
    path.len() >= suffix.len()
        && path[path.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(a, b)| a.as_slice() == *b)
}
