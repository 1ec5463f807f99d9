//! Shared test utilities for integration tests
//!
//! Fixture paths and small table builders used across test files.

#![allow(dead_code)]

use std::path::PathBuf;

use assert_fs::prelude::*;

/// Path of a checked-in fixture table
pub fn fixture(name: &str) -> PathBuf
{
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Wrap `CheatEntry` nodes in a minimal table document
pub fn table(entries: &str) -> String
{
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<CheatTable>\n<CheatEntries>\n{entries}\n</CheatEntries>\n</CheatTable>\n"
    )
}

/// One `CheatEntry` with optional address and offsets
pub fn cheat_entry(
    description: &str,
    address: Option<&str>,
    offsets: &[&str],
) -> String
{
    let mut out = format!("<CheatEntry><Description>{description}</Description>");
    if let Some(address) = address
    {
        out.push_str(&format!("<Address>{address}</Address>"));
    }
    if !offsets.is_empty()
    {
        out.push_str("<Offsets>");
        for o in offsets
        {
            out.push_str(&format!("<Offset>{o}</Offset>"));
        }
        out.push_str("</Offsets>");
    }
    out.push_str("</CheatEntry>");
    out
}

/// Temp project holding a copy of the `game.CT` fixture
pub fn project_with_game_table() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("game.CT")
        .write_file(&fixture("game.CT"))
        .expect("copy fixture");
    tmp
}
