//! One translation call: load a table, emit it once.

use std::io::BufRead;
use std::path::Path;

use tracing::instrument;

use crate::core::emit::{EmitOptions, Emitter, Language, ModuleSet};
use crate::core::loader::{SkippedEntry, load};
use crate::error::Result;
use crate::infra::io::read_table;

/// Output of a translation
#[derive(Debug)]
pub struct Translation
{
    pub language: Language,

    /// Generated source text
    pub text: String,

    /// Number of entries that reached the emitter
    pub entries: usize,

    /// Entries left out because their address was malformed
    pub skipped: Vec<SkippedEntry>,

    /// Module bases declared in `text`
    pub modules: ModuleSet,
}

/// Translate a table from a reader.
pub fn translate<R: BufRead>(
    reader: R,
    language: Language,
    options: EmitOptions,
) -> Result<Translation>
{
    let table = load(reader)?;

    let mut modules = ModuleSet::new();
    let text = Emitter::with_options(language, options).emit(&table.entries, &mut modules);

    Ok(Translation { language, text, entries: table.entries.len(), skipped: table.skipped, modules })
}

/// Translate a table file. The file (or its mapping) is released before
/// this returns.
#[instrument(skip(path, options), fields(path = %path.display()))]
pub fn translate_file(
    path: &Path,
    language: Language,
    options: EmitOptions,
) -> Result<Translation>
{
    let content = read_table(path)?;
    translate(content.as_bytes(), language, options)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn malformed_document_produces_no_text()
    {
        let err = translate("<CheatTable>".as_bytes(), Language::Python, EmitOptions::default());
        assert!(err.is_err());
    }

    #[test]
    fn reports_modules_and_skips()
    {
        let xml = r#"<CheatTable><CheatEntries>
            <CheatEntry><Description>A</Description><Address>"Game.exe"+10</Address>
              <Offsets><Offset>4</Offset></Offsets></CheatEntry>
            <CheatEntry><Description>B</Description><Address>"Game.exe"</Address>
              <Offsets><Offset>4</Offset></Offsets></CheatEntry>
        </CheatEntries></CheatTable>"#;

        let t = translate(xml.as_bytes(), Language::Cpp, EmitOptions { banner: false }).unwrap();
        assert_eq!(t.entries, 1);
        assert_eq!(t.skipped.len(), 1);
        assert_eq!(
            t.modules
                .iter()
                .collect::<Vec<_>>(),
            vec![("Game", "Game.exe")]
        );
        assert!(t.text.contains("uintptr_t A = GameBase + 0x10;"));
    }
}
