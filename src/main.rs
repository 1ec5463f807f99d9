use anyhow::Result;
use clap::Parser;
use ctlang::cli::{AppContext, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    ctlang::infra::init_tracing(cli.verbose, cli.no_color);

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Convert(args) => ctlang::convert_run(args, &ctx),
        Commands::Inspect(args) => ctlang::inspect_run(args, &ctx),
        Commands::Init(args) => ctlang::infra::config::init(args, &ctx),
    }
}
