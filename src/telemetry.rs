use std::error::Error;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Installs the JSON subscriber and routes teloxide's `log` records into it.
pub fn init_tracing(level: &str) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_new(level)?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_span_events(FmtSpan::ENTER)
        .log_internal_errors(true)
        .with_line_number(true)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;
    Ok(())
}
