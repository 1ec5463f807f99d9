//! `ctlang convert`: translate a table and persist the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::info;

use crate::cli::{AppContext, ConvertArgs};
use crate::core::emit::Language;
use crate::core::translate::{Translation, translate_file};
use crate::infra::config::{ConvertConfig, load_config};

pub fn run(
    args: ConvertArgs,
    ctx: &AppContext,
) -> Result<()>
{
    // Load configuration with graceful fallback
    let config = load_config()
        .unwrap_or_default()
        .convert;

    let language = args
        .lang
        .unwrap_or(config.language);
    let mut options = config.emit_options();
    if args.no_banner
    {
        options.banner = false;
    }

    let translation = translate_file(&args.input, language, options)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    report_skipped(&translation, ctx);

    if args.stdout
    {
        print!("{}", translation.text);
        return Ok(());
    }

    let target = output_path(&args, &config, language);

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("{}", "DRY RUN: Would write:".yellow());
            println!("  Output: {}", target.display());
            println!("  Language: {}", translation.language);
            println!("  Entries: {}", translation.entries);
            println!("  Modules: {}", translation.modules.len());
        }
        return Ok(());
    }

    if let Some(parent) = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&target, &translation.text)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    info!(path = %target.display(), "wrote translation");

    if !ctx.quiet
    {
        let line = format!(
            "✓ Converted {} entries to {language}: {}",
            translation.entries,
            target.display()
        );
        if ctx.no_color
        {
            println!("{line}");
        }
        else
        {
            println!("{}", line.green());
        }
    }

    Ok(())
}

/// `--output`, else `<output_dir>/<stem>.<ext>`, else next to the input.
fn output_path(
    args: &ConvertArgs,
    config: &ConvertConfig,
    language: Language,
) -> PathBuf
{
    if let Some(explicit) = &args.output
    {
        return explicit.clone();
    }

    let file_name = Path::new(
        args.input
            .file_stem()
            .unwrap_or_else(|| "table".as_ref()),
    )
    .with_extension(language.extension());

    match &config.output_dir
    {
        Some(dir) => dir.join(file_name),
        None => args
            .input
            .with_file_name(file_name),
    }
}

fn report_skipped(
    translation: &Translation,
    ctx: &AppContext,
)
{
    if ctx.quiet
    {
        return;
    }

    for skipped in &translation.skipped
    {
        let line = format!(
            "warning: skipped entry {:?} ({}): {}",
            skipped.name, skipped.address, skipped.reason
        );
        if ctx.no_color
        {
            eprintln!("{line}");
        }
        else
        {
            eprintln!("{}", line.yellow());
        }
    }
}
