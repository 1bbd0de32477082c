use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over the `--debug` flag.
/// Logs go to stderr so stdout carries only the report and payloads.
pub fn init(debug: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if debug {
      EnvFilter::new(format!("warn,{}=debug", env!("CARGO_CRATE_NAME")))
    } else {
      EnvFilter::new("warn")
    }
  });

  // A second init (e.g. from tests) is harmless.
  let _ = tracing_subscriber::registry()
    .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
    .with(filter)
    .try_init();
}
