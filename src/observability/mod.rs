//! Structured tracing for request accounting.
//!
//! Every priced request can be wrapped in a [`RequestSpan`] that records its
//! token counts, cost and latency. The crate only emits `tracing` events;
//! installing a subscriber is up to the application, or enable the
//! `subscriber` feature and call `init_subscriber`:
//!
//! ```toml
//! prompt-cost = { version = "0.1", features = ["subscriber"] }
//! ```
//!
//! ```rust,ignore
//! use prompt_cost::observability::{TracingConfig, TracingLevel, init_subscriber};
//!
//! init_subscriber(&TracingConfig::new().level(TracingLevel::Debug))?;
//! ```

mod spans;

pub use spans::{RequestSpan, SpanContext, TracingConfig, TracingLevel};

/// Installs a global fmt subscriber. `RUST_LOG` takes precedence over
/// `config.level`. Does nothing when the config is disabled.
#[cfg(feature = "subscriber")]
#[cfg_attr(docsrs, doc(cfg(feature = "subscriber")))]
pub fn init_subscriber(
    config: &TracingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    if !config.enabled {
        return Ok(());
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
}
