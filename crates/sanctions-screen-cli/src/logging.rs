//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count, used when `RUST_LOG` is unset.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "sanctions_screen=warn,sanctions_screen_cli=warn",
        1 => "sanctions_screen=info,sanctions_screen_cli=info",
        _ => "sanctions_screen=debug,sanctions_screen_cli=debug",
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries results.
pub fn init(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}
