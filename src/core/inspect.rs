//! `ctlang inspect`: show how each entry of a table was classified.

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::cli::{AppContext, InspectArgs};
use crate::core::entry::{Entry, EntryKind};
use crate::core::loader::load;
use crate::infra::io::read_table;

pub fn run(
    args: InspectArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let content = read_table(&args.input)?;
    let table = load(content.as_bytes())
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    drop(content);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.json
    {
        for entry in &table.entries
        {
            serde_json::to_writer(&mut out, entry).context("serialize entry")?;
            writeln!(out)?;
        }
        for skipped in &table.skipped
        {
            serde_json::to_writer(&mut out, &serde_json::json!({ "skipped": skipped }))
                .context("serialize skipped entry")?;
            writeln!(out)?;
        }
        out.flush()?;
        return Ok(());
    }

    for entry in &table.entries
    {
        let kind = format!("{:<9}", entry.kind);
        if ctx.no_color
        {
            writeln!(out, "{kind} {}  {}", entry.name, describe(entry))?;
        }
        else
        {
            writeln!(out, "{} {}  {}", kind.cyan(), entry.name.bold(), describe(entry).dimmed())?;
        }
    }

    if !ctx.quiet
    {
        writeln!(out, "{} entries, {} skipped", table.entries.len(), table.skipped.len())?;
        for skipped in &table.skipped
        {
            writeln!(out, "  skipped {:?}: {}", skipped.name, skipped.reason)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// One-line summary of where an entry points.
fn describe(entry: &Entry) -> String
{
    let offset = entry
        .base_offset
        .as_deref()
        .unwrap_or("");
    let chain = if entry
        .dereference_chain
        .is_empty()
    {
        String::new()
    }
    else
    {
        format!(
            " -> [{}]",
            entry
                .dereference_chain
                .join(", ")
        )
    };

    match entry.kind
    {
        EntryKind::Pointer => format!(
            "{}+{offset}{chain}",
            entry
                .module
                .as_deref()
                .unwrap_or("")
        ),
        EntryKind::Offset => format!("+{offset}{chain}"),
        EntryKind::Namespace => format!("{} members", entry.children.len()),
        EntryKind::Direct => offset.to_string(),
        EntryKind::Unknown => entry
            .variable_type
            .clone()
            .unwrap_or_default(),
    }
}
