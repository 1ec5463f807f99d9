use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::emit::{EmitOptions, Language};

/// File names checked in the working directory, first match wins
pub const CONFIG_FILES: [&str; 4] = ["ctlang.toml", "ctlang.yaml", "ctlang.json", ".ctlang.toml"];

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Default conversion settings
    pub convert: ConvertConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig
{
    /// Language used when `--lang` is not given
    pub language: Language,

    /// Prefix generated files with a generator banner
    pub banner: bool,

    /// Directory for generated files; next to the table when unset
    pub output_dir: Option<PathBuf>,
}

impl Default for ConvertConfig
{
    fn default() -> Self
    {
        Self { language: Language::Python, banner: true, output_dir: None }
    }
}

impl ConvertConfig
{
    pub fn emit_options(&self) -> EmitOptions
    {
        EmitOptions { banner: self.banner }
    }
}

pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

/// Load configuration from `dir`, then `CTLANG_*` environment overrides
/// (`CTLANG_CONVERT__LANGUAGE=cpp`).
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    for name in &CONFIG_FILES
    {
        let path = dir.join(name);
        if path.exists()
        {
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("CTLANG")
            .prefix_separator("_")
            .separator("__"),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("Would write {}:\n{toml_string}", config_path.display());
        }
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
