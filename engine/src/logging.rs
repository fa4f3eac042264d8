use tracing_subscriber::EnvFilter;

/// Installs the tracing subscriber for binaries and test harnesses.
/// Spin outcomes are logged at info under `engine::games`.
pub fn setup() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,engine::games=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .ok();
}
