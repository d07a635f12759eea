use tracing_subscriber::EnvFilter;

/// Initialize diagnostics on stderr. `RUST_LOG` overrides the level picked by `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "youtrack=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
