//! **ctlang** - Cheat Engine table to source-code translator
//!
//! Streams a `.CT` table, classifies every `CheatEntry` by address shape and
//! emits Python, C++ or C# declarations with one module-base declaration per
//! module.

/// Command-line interface with clap integration
pub mod cli;

/// Engine error taxonomy
pub mod error;

/// Translation engine and command handlers
pub mod core {
    /// Label → identifier sanitation
    pub mod sanitize;
    pub use sanitize::sanitize;

    /// Normalized entry model
    pub mod entry;
    pub use entry::{Entry, EntryKind, SubEntry};

    /// Address-shape classification of single entries
    pub mod classify;
    pub use classify::classify;

    /// Streaming XML loader
    pub mod loader;
    pub use loader::{LoadedTable, SkippedEntry, load};

    /// Per-language emitters sharing one pass
    pub mod emit;
    pub use emit::{Dialect, EmitOptions, Emitter, Language, ModuleSet};

    /// Load + emit facade
    pub mod translate;
    pub use translate::{Translation, translate, translate_file};

    /// `convert` command
    pub mod convert;
    pub use convert::run as convert_run;

    /// `inspect` command
    pub mod inspect;
    pub use inspect::run as inspect_run;
}

/// Infrastructure - Configuration, I/O and logging
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Table reading with memory mapping for large files
    pub mod io;
    pub use io::{TableContent, read_table};

    /// Tracing subscriber setup
    pub mod logging;
    pub use logging::init_tracing;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use self::core::{convert_run, inspect_run};
pub use infra::{Config, load_config};

// Core types for external consumers
pub use self::core::{
    Emitter, Entry, EntryKind, Language, ModuleSet, SubEntry, Translation, load, sanitize,
    translate, translate_file,
};
pub use error::TranslateError;
