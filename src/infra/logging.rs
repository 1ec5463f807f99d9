//! Tracing subscriber setup for the binary.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Install the global subscriber once; later calls are ignored.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
/// output for this crate when `verbose` is on. Events go to stderr so that
/// `convert --stdout` output stays clean.
pub fn init_tracing(
    verbose: bool,
    no_color: bool,
)
{
    INIT.call_once(|| {
        let default = if verbose { "warn,ctlang=debug" } else { "warn" };
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(verbose)
            .with_ansi(!no_color)
            .without_time();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    });
}
