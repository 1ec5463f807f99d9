//! Per-language emission of classified entries.
//!
//! One pass over the entries fills four section buffers which are joined in a
//! fixed order: module bases, pointers/offsets, namespaces, direct constants.
//! Base declarations therefore always precede their first use. The pass is
//! written once; each target language only supplies a [`Dialect`].

pub mod cpp;
pub mod csharp;
pub mod python;

use std::fmt::Write as _;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

pub use cpp::Cpp;
pub use csharp::CSharp;
pub use python::Python;

use crate::core::entry::{Entry, EntryKind};
use crate::core::sanitize::sanitize_or;
use crate::error::TranslateError;

/// Name of the generator printed in the output banner.
pub const GENERATOR: &str = concat!("ctlang ", env!("CARGO_PKG_VERSION"));

/// Grouping name used when a namespace label sanitizes to nothing.
pub const UNNAMED_STRUCT: &str = "UnnamedStruct";

/// Module identifier used when a module stem sanitizes to nothing.
pub const UNNAMED_MODULE: &str = "Module";

/// Target languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language
{
    /// Python module-level assignments
    #[value(alias = "py")]
    Python,

    /// C++ declarations using uintptr_t
    #[value(alias = "c++")]
    Cpp,

    /// C# declarations using IntPtr
    #[value(name = "csharp", alias = "cs", alias = "c#")]
    CSharp,
}

impl Language
{
    pub const ALL: [Language; 3] = [Language::Python, Language::Cpp, Language::CSharp];

    /// Syntax table for this language
    pub fn dialect(self) -> &'static dyn Dialect
    {
        match self
        {
            Language::Python => &Python,
            Language::Cpp => &Cpp,
            Language::CSharp => &CSharp,
        }
    }

    /// File extension (without dot) for generated sources
    pub fn extension(self) -> &'static str
    {
        self.dialect()
            .extension()
    }
}

impl std::fmt::Display for Language
{
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result
    {
        f.write_str(
            self.dialect()
                .display_name(),
        )
    }
}

impl FromStr for Language
{
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "python" | "py" => Ok(Language::Python),
            "cpp" | "c++" => Ok(Language::Cpp),
            "csharp" | "cs" | "c#" => Ok(Language::CSharp),
            _ => Err(TranslateError::UnsupportedLanguage(s.to_string())),
        }
    }
}

/// Literal syntax of one target language.
///
/// Every method returns complete lines including the trailing newline, except
/// [`Dialect::hex`] which renders a single literal.
pub trait Dialect: Sync
{
    /// Human-readable language name for banners and messages
    fn display_name(&self) -> &'static str;

    fn extension(&self) -> &'static str;

    /// Line comment marker
    fn comment(&self) -> &'static str;

    /// Identifier the generated code expects the caller to define for
    /// module-less offsets
    fn base_symbol(&self) -> &'static str;

    /// `<ident> = GetModuleBaseAddress(<pid>, "<module>")`
    fn module_base(
        &self,
        ident: &str,
        module: &str,
    ) -> String;

    /// `<ident> = <base> + <offset>`
    fn address(
        &self,
        ident: &str,
        base: &str,
        offset: &str,
    ) -> String;

    /// `<ident>Offsets = [...]`
    fn offset_list(
        &self,
        ident: &str,
        offsets: &[String],
    ) -> String;

    /// Grouping block with one constant per `(name, literal)` member
    fn group(
        &self,
        ident: &str,
        members: &[(String, String)],
    ) -> String;

    /// `<ident> = <value>` with `value` untouched
    fn direct(
        &self,
        ident: &str,
        value: &str,
    ) -> String;

    /// Render an opaque hex string as a literal
    fn hex(
        &self,
        value: &str,
    ) -> String
    {
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        format!("0x{digits}")
    }
}

/// Module base declarations emitted during one run, keyed by sanitized
/// identifier, mapping to the raw module name that claimed it first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModuleSet(IndexMap<String, String>);

impl ModuleSet
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Record `module` under `ident`. Returns true on first sight of `ident`.
    pub fn claim(
        &mut self,
        ident: &str,
        module: &str,
    ) -> bool
    {
        match self
            .0
            .get(ident)
        {
            None =>
            {
                self.0
                    .insert(ident.to_string(), module.to_string());
                true
            }
            Some(first) =>
            {
                if first != module
                {
                    warn!(
                        identifier = ident,
                        first = %first,
                        module,
                        "module names collide after sanitizing; sharing the first declaration"
                    );
                }
                false
            }
        }
    }

    pub fn len(&self) -> usize
    {
        self.0
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.0
            .is_empty()
    }

    /// `(identifier, module)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)>
    {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Emission options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions
{
    /// Prefix the output with a generator banner
    pub banner: bool,
}

impl Default for EmitOptions
{
    fn default() -> Self
    {
        Self { banner: true }
    }
}

/// Section buffers filled by one pass.
#[derive(Default)]
struct Sections
{
    modules: String,
    pointers: String,
    namespaces: String,
    direct: String,
}

/// Emitter bound to one language
pub struct Emitter
{
    language: Language,
    options: EmitOptions,
}

impl Emitter
{
    pub fn new(language: Language) -> Self
    {
        Self { language, options: EmitOptions::default() }
    }

    pub fn with_options(
        language: Language,
        options: EmitOptions,
    ) -> Self
    {
        Self { language, options }
    }

    /// Translate `entries` into one source text.
    ///
    /// `modules` deduplicates module base declarations for this call only;
    /// pass a fresh set per translation.
    #[instrument(skip_all, fields(language = %self.language, entries = entries.len()))]
    pub fn emit(
        &self,
        entries: &[Entry],
        modules: &mut ModuleSet,
    ) -> String
    {
        let d = self
            .language
            .dialect();
        let mut s = Sections::default();

        for (index, entry) in entries
            .iter()
            .enumerate()
        {
            let ident = || sanitize_or(&entry.name, || format!("Unnamed{index}"));

            match entry.kind
            {
                EntryKind::Pointer | EntryKind::Offset =>
                {
                    emit_address(d, entry, &ident(), modules, &mut s);
                }
                EntryKind::Namespace =>
                {
                    let group = sanitize_or(&entry.name, || UNNAMED_STRUCT.to_string());
                    let members: Vec<(String, String)> = entry
                        .children
                        .iter()
                        .enumerate()
                        .map(|(i, child)| {
                            (sanitize_or(&child.name, || format!("Unnamed{i}")), d.hex(&child.address))
                        })
                        .collect();
                    if !s
                        .namespaces
                        .is_empty()
                    {
                        s.namespaces
                            .push('\n');
                    }
                    s.namespaces
                        .push_str(&d.group(&group, &members));
                }
                EntryKind::Direct =>
                {
                    let value = entry
                        .base_offset
                        .as_deref()
                        .unwrap_or_default();
                    s.direct
                        .push_str(&d.direct(&ident(), value));
                }
                EntryKind::Unknown =>
                {}
            }
        }

        debug!(modules = modules.len(), "emitted sections");
        self.assemble(d, s)
    }

    fn assemble(
        &self,
        d: &dyn Dialect,
        s: Sections,
    ) -> String
    {
        let c = d.comment();
        let mut out = String::new();

        if self
            .options
            .banner
        {
            let _ = writeln!(out, "{c} Converted to {} with {GENERATOR}", d.display_name());
            out.push('\n');
        }

        let sections = [
            ("Module base addresses", s.modules),
            ("Pointers and offsets", s.pointers),
            ("Namespaces", s.namespaces),
            ("Direct addresses", s.direct),
        ];

        for (i, (title, body)) in sections
            .into_iter()
            .enumerate()
        {
            if i > 0
            {
                out.push('\n');
            }
            let _ = writeln!(out, "{c} {title}");
            out.push_str(&body);
        }

        out
    }
}

fn emit_address(
    d: &dyn Dialect,
    entry: &Entry,
    ident: &str,
    modules: &mut ModuleSet,
    s: &mut Sections,
)
{
    let offset = d.hex(
        entry
            .base_offset
            .as_deref()
            .unwrap_or_default(),
    );

    let base = match (entry.module.as_deref(), entry.module_stem())
    {
        (Some(module), Some(stem)) =>
        {
            let module_ident = sanitize_or(stem, || UNNAMED_MODULE.to_string());
            let base = format!("{module_ident}Base");
            if modules.claim(&module_ident, module)
            {
                s.modules
                    .push_str(&d.module_base(&base, module));
            }
            base
        }
        _ => d
            .base_symbol()
            .to_string(),
    };

    s.pointers
        .push_str(&d.address(ident, &base, &offset));

    if !entry
        .dereference_chain
        .is_empty()
    {
        let chain: Vec<String> = entry
            .dereference_chain
            .iter()
            .map(|o| d.hex(o))
            .collect();
        s.pointers
            .push_str(&d.offset_list(&format!("{ident}Offsets"), &chain));
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::entry::SubEntry;

    fn entry(
        name: &str,
        kind: EntryKind,
    ) -> Entry
    {
        Entry {
            name: name.into(),
            raw_address: None,
            kind,
            module: None,
            base_offset: None,
            dereference_chain: vec![],
            children: vec![],
            variable_type: None,
        }
    }

    fn pointer(
        name: &str,
        module: &str,
        offset: &str,
    ) -> Entry
    {
        Entry {
            module: Some(module.into()),
            base_offset: Some(offset.into()),
            dereference_chain: vec!["10".into()],
            ..entry(name, EntryKind::Pointer)
        }
    }

    fn plain() -> EmitOptions
    {
        EmitOptions { banner: false }
    }

    #[test]
    fn parses_language_names()
    {
        assert_eq!("Python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("c++".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("C#".parse::<Language>().unwrap(), Language::CSharp);
        assert!(matches!(
            "rust".parse::<Language>(),
            Err(TranslateError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn sections_appear_in_fixed_order()
    {
        let entries = vec![
            Entry { base_offset: Some("5".into()), ..entry("Direct One", EntryKind::Direct) },
            Entry {
                children: vec![SubEntry { name: "a".into(), address: "1".into() }],
                ..entry("Group", EntryKind::Namespace)
            },
            pointer("Hp", "Game.exe", "10"),
        ];
        let out = Emitter::with_options(Language::Python, plain()).emit(&entries, &mut ModuleSet::new());

        let modules = out
            .find("# Module base addresses")
            .unwrap();
        let pointers = out
            .find("# Pointers and offsets")
            .unwrap();
        let groups = out
            .find("# Namespaces")
            .unwrap();
        let direct = out
            .find("# Direct addresses")
            .unwrap();
        assert!(modules < pointers && pointers < groups && groups < direct);
        assert!(out.find("GameBase = ").unwrap() < out.find("Hp = GameBase").unwrap());
    }

    #[test]
    fn module_base_declared_once_per_identifier()
    {
        let entries = vec![pointer("A", "Game.exe", "1"), pointer("B", "Game.exe", "2")];
        let mut modules = ModuleSet::new();
        let out = Emitter::with_options(Language::Cpp, plain()).emit(&entries, &mut modules);

        assert_eq!(out.matches("GetModuleBaseAddress").count(), 1);
        assert_eq!(modules.len(), 1);
        assert_eq!(
            modules
                .iter()
                .collect::<Vec<_>>(),
            vec![("Game", "Game.exe")]
        );
    }

    #[test]
    fn colliding_modules_share_first_declaration()
    {
        let entries = vec![pointer("A", "game.exe", "1"), pointer("B", "game.dll", "2")];
        let mut modules = ModuleSet::new();
        let out = Emitter::with_options(Language::Python, plain()).emit(&entries, &mut modules);

        assert_eq!(out.matches("GetModuleBaseAddress").count(), 1);
        assert!(out.contains("\"game.exe\""));
        assert!(!out.contains("\"game.dll\""));
        assert!(out.contains("B = gameBase + 0x2"));
    }

    #[test]
    fn unknown_contributes_nothing()
    {
        for language in Language::ALL
        {
            let emitter = Emitter::with_options(language, plain());
            let empty = emitter.emit(&[], &mut ModuleSet::new());
            let unknown = emitter.emit(&[entry("Ghost", EntryKind::Unknown)], &mut ModuleSet::new());
            assert_eq!(empty, unknown);
        }
    }

    #[test]
    fn empty_names_get_placeholders()
    {
        let entries = vec![
            Entry { base_offset: Some("1".into()), ..entry("123", EntryKind::Direct) },
            Entry {
                children: vec![SubEntry { name: "x".into(), address: "1".into() }],
                ..entry("...", EntryKind::Namespace)
            },
        ];
        let out = Emitter::with_options(Language::Python, plain()).emit(&entries, &mut ModuleSet::new());
        assert!(out.contains("Unnamed0 = 1"));
        assert!(out.contains("class UnnamedStruct:"));
    }

    #[test]
    fn hex_does_not_double_prefix()
    {
        assert_eq!(Python.hex("A1"), "0xA1");
        assert_eq!(Python.hex("0xA1"), "0xA1");
    }

    #[test]
    fn banner_names_language()
    {
        let out = Emitter::new(Language::CSharp).emit(&[], &mut ModuleSet::new());
        assert!(out.starts_with("// Converted to C# with ctlang"));
    }
}
