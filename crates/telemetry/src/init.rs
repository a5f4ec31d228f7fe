// Path: crates/telemetry/src/init.rs
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// The filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global JSON subscriber, filtered by `RUST_LOG` or
/// [`DEFAULT_FILTER`].
pub fn init_tracing() -> Result<(), anyhow::Error> {
    init_tracing_with(DEFAULT_FILTER)
}

/// Installs the global JSON subscriber. `RUST_LOG` wins over `default_filter`
/// when it is set and parses.
///
/// The subscriber is installed before the `log` bridge, so a call that finds a
/// subscriber already in place fails without touching the `log` facade. A
/// second call in the same process returns an error rather than replacing the
/// first.
pub fn init_tracing_with(default_filter: &str) -> Result<(), anyhow::Error> {
    let filter = build_filter(default_filter)?;
    let fmt_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true);
    let subscriber = Registry::default().with(filter).with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;
    Ok(())
}

fn build_filter(default_filter: &str) -> Result<EnvFilter, anyhow::Error> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(default_filter)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_target_directives() {
        assert!(build_filter("executor=debug,table=trace").is_ok());
    }

    #[test]
    fn second_install_fails_at_the_subscriber() {
        let _ = init_tracing_with("warn");
        let err = init_tracing().unwrap_err();
        assert!(
            err.is::<tracing::subscriber::SetGlobalDefaultError>(),
            "unexpected error: {err}"
        );
    }
}
