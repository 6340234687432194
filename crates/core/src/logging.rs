//! Tracing initialisation

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins over `default_filter`. Safe to call more than once; only
/// the first call installs a subscriber.
pub fn init_tracing(default_filter: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing("warn", LogFormat::Json);
        init_tracing("debug", LogFormat::Text);
        tracing::debug!("still alive after double init");
    }
}
