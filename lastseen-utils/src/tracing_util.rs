use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Install the global subscriber. Logs go to stderr, filtered by RUST_LOG.
pub fn init_tracing(service_name: &'static str) {
    let is_release = cfg!(not(debug_assertions));
    let log_level = if is_release { "info" } else { "debug" };

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        // .json(); // Optional: switch to .pretty() for human-readable
        .pretty();

    Registry::default()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    info!(service = service_name, "Tracing initialized");
}
