//! Entry classification: one raw node in, one typed [`Entry`] out.
//!
//! Decision order, first match wins:
//! 1. no (or blank) address → `Unknown`
//! 2. address with offsets → `Pointer` (module marker present) or `Offset`
//! 3. address with addressed children → `Namespace`
//! 4. anything else → `Direct`

use tracing::trace;

use crate::core::entry::{Entry, EntryKind, RawChild, RawEntry, SubEntry, UNKNOWN_NAME, unquote};
use crate::error::EntryMalformed;

/// File extensions that mark an address as module-relative.
pub const MODULE_MARKERS: &[&str] = &[".exe", ".dll"];

/// `VariableType` value that carries no type information.
pub const SCRIPT_VARIABLE_TYPE: &str = "Auto Assembler Script";

/// Classify a single raw entry. Pure; never looks at siblings.
///
/// A blank `<Address/>` counts as no address.
pub fn classify(raw: RawEntry) -> Result<Entry, EntryMalformed>
{
    let name = raw
        .description
        .as_deref()
        .map(|d| unquote(d).to_string())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());

    let variable_type = raw
        .variable_type
        .filter(|t| t != SCRIPT_VARIABLE_TYPE);

    let mut entry = Entry {
        name,
        raw_address: raw.address.clone(),
        kind: EntryKind::Unknown,
        module: None,
        base_offset: None,
        dereference_chain: Vec::new(),
        children: Vec::new(),
        variable_type,
    };

    let Some(address) = raw
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
    else
    {
        return Ok(entry);
    };

    if !raw.offsets.is_empty()
    {
        if has_module_marker(address)
        {
            let (module, offset) = split_module(&entry.name, address)?;
            entry.kind = EntryKind::Pointer;
            entry.module = Some(module);
            entry.base_offset = Some(offset);
        }
        else
        {
            let offset = strip_plus(address);
            if offset.is_empty()
            {
                return Err(EntryMalformed {
                    name: entry.name,
                    address: address.to_string(),
                    reason: "offset address is empty after `+`".to_string(),
                });
            }
            entry.kind = EntryKind::Offset;
            entry.base_offset = Some(offset.to_string());
        }
        entry.dereference_chain = raw.offsets;
    }
    else if raw
        .children
        .iter()
        .any(|c| child_address(c).is_some())
    {
        entry.kind = EntryKind::Namespace;
        entry.children = raw
            .children
            .iter()
            .filter_map(|child| {
                Some(SubEntry {
                    address: child_address(child)?.to_string(),
                    name: child
                        .description
                        .as_deref()
                        .map(|d| unquote(d).to_string())
                        .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                })
            })
            .collect();
    }
    else
    {
        entry.kind = EntryKind::Direct;
        entry.base_offset = Some(address.to_string());
    }

    trace!(name = %entry.name, kind = %entry.kind, "classified entry");
    Ok(entry)
}

/// ASCII case-insensitive check for `.exe` / `.dll` anywhere in the address.
pub fn has_module_marker(address: &str) -> bool
{
    let lower = address.to_ascii_lowercase();
    MODULE_MARKERS
        .iter()
        .any(|m| lower.contains(m))
}

/// Namespace member address with the leading `+` removed; blank is none.
fn child_address(child: &RawChild) -> Option<&str>
{
    child
        .address
        .as_deref()
        .map(|a| strip_plus(a.trim()))
        .filter(|a| !a.is_empty())
}

/// Split `"Game.exe"+A1B2` into (`Game.exe`, `A1B2`).
fn split_module(
    name: &str,
    address: &str,
) -> Result<(String, String), EntryMalformed>
{
    let malformed = |reason: &str| EntryMalformed {
        name: name.to_string(),
        address: address.to_string(),
        reason: reason.to_string(),
    };

    let (module, rest) = address
        .split_once('+')
        .ok_or_else(|| malformed("module address has no `+` offset"))?;

    let offset = rest.trim();
    if offset.is_empty()
    {
        return Err(malformed("module offset is empty"));
    }
    if offset.contains('+')
    {
        return Err(malformed("module address has more than one `+` offset"));
    }

    let module = unquote(module.trim());
    if module.is_empty()
    {
        return Err(malformed("module name is empty"));
    }

    Ok((module.to_string(), offset.to_string()))
}

fn strip_plus(address: &str) -> &str
{
    address
        .strip_prefix('+')
        .unwrap_or(address)
}
