//! Process-wide tracing setup.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `FICOSCAN_LOG=ficoscan=debug`.
pub const LOG_ENV: &str = "FICOSCAN_LOG";

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// the report. Calling it more than once is harmless.
pub fn init_logging(json: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_thread_names(true);
        let result = if json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        if let Err(err) = result {
            eprintln!("logging already initialised: {err}");
        }
    });
}
