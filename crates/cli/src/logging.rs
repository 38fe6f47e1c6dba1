use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize stderr logging for the CLI. `RUST_LOG` takes precedence over
/// `level`.
pub fn init_logging(level: Level) {
    let level_str = level.as_str().to_lowercase();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("fitrack={level_str},fitrack_core={level_str},fitrack_http={level_str}").into()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
