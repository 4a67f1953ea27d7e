use env_logger::Env;

/// Initialises `env_logger`, honouring `RUST_LOG` and falling back to
/// `default_filter`. Calling it again is a no-op.
pub fn init_logger(default_filter: &str) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}
