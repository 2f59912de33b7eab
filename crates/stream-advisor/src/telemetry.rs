use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("telemetry error: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// `RUST_LOG` wins over the configured level so operators can raise verbosity ad hoc.
pub fn filter_for(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::EnvFilter {
        value: config.log_level.clone(),
        source,
    })
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = filter_for(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_directive_style_levels() {
        let config = TelemetryConfig {
            log_level: "stream_advisor=debug,info".to_string(),
        };
        if std::env::var("RUST_LOG").is_err() {
            assert!(filter_for(&config).is_ok());
        }
    }

    #[test]
    fn reports_the_rejected_filter() {
        let config = TelemetryConfig {
            log_level: "stream_advisor=loud".to_string(),
        };
        if std::env::var("RUST_LOG").is_err() {
            let err = filter_for(&config).expect_err("invalid level rejected");
            assert!(err.to_string().contains("stream_advisor=loud"));
        }
    }
}
