use std::io;
use tracing::Subscriber;
use tracing_subscriber::{fmt, fmt::MakeWriter, EnvFilter};

/// Initialize the tracing subscriber for command-line use.
/// - Respects `RUST_LOG` if set, otherwise uses `default_filter`
/// - `json` switches from compact text to structured JSON lines
/// - Always writes to stderr, leaving stdout for command output
pub fn init_logging_stderr(default_filter: &str, json: bool) {
    let _ = tracing::subscriber::set_global_default(build_subscriber(default_filter, json, io::stderr));
}

/// Build the fmt subscriber writing to `writer`.
pub fn build_subscriber<W>(default_filter: &str, json: bool, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(writer);
    // 两种格式类型不同，需分别装箱
    if json {
        Box::new(builder.json().finish())
    } else {
        Box::new(builder.compact().finish())
    }
}
