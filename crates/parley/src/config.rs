//! Reads the endpoint configuration from the environment.
//!
//! - `PARLEY_ENDPOINT_URL`: where messages are posted, defaults to
//!   [`DEFAULT_URL`](parley_http_endpoint::DEFAULT_URL).
//! - `PARLEY_TIMEOUT_SECS`: optional request timeout in whole seconds.
//!   Unset means requests never time out.

use std::env;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use parley_http_endpoint::{HttpEndpointConfig, HttpEndpointConfigBuilder};

/// Variable holding the endpoint URL.
pub const ENDPOINT_URL_VAR: &str = "PARLEY_ENDPOINT_URL";
/// Variable holding the request timeout.
pub const TIMEOUT_SECS_VAR: &str = "PARLEY_TIMEOUT_SECS";

/// A variable was set to something unusable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    var: &'static str,
    value: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.var, self.value)
    }
}

impl Error for ConfigError {}

/// Builds the endpoint configuration from the process environment.
#[inline]
pub fn endpoint_config_from_env() -> Result<HttpEndpointConfig, ConfigError> {
    endpoint_config_from(|var| env::var(var).ok())
}

/// Builds the endpoint configuration from an arbitrary variable lookup.
pub fn endpoint_config_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<HttpEndpointConfig, ConfigError> {
    let mut builder = HttpEndpointConfigBuilder::new();

    if let Some(url) = lookup(ENDPOINT_URL_VAR) {
        let url = url.trim();
        if url.is_empty() {
            return Err(ConfigError {
                var: ENDPOINT_URL_VAR,
                value: url.to_owned(),
            });
        }
        builder = builder.with_url(url);
    }

    if let Some(secs) = lookup(TIMEOUT_SECS_VAR) {
        let Ok(secs) = secs.trim().parse::<u64>() else {
            return Err(ConfigError {
                var: TIMEOUT_SECS_VAR,
                value: secs,
            });
        };
        if secs > 0 {
            builder = builder.with_timeout(Duration::from_secs(secs));
        }
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use parley_http_endpoint::DEFAULT_URL;

    use super::*;

    fn lookup_in(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = endpoint_config_from(lookup_in(&[])).unwrap();
        assert_eq!(config.url(), DEFAULT_URL);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_overrides() {
        let config = endpoint_config_from(lookup_in(&[
            (ENDPOINT_URL_VAR, " http://10.0.0.2:8000/chat "),
            (TIMEOUT_SECS_VAR, "30"),
        ]))
        .unwrap();
        assert_eq!(config.url(), "http://10.0.0.2:8000/chat");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config =
            endpoint_config_from(lookup_in(&[(TIMEOUT_SECS_VAR, "0")]))
                .unwrap();
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_invalid_values() {
        let err =
            endpoint_config_from(lookup_in(&[(TIMEOUT_SECS_VAR, "soon")]))
                .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for PARLEY_TIMEOUT_SECS: \"soon\""
        );

        let err = endpoint_config_from(lookup_in(&[(ENDPOINT_URL_VAR, "  ")]))
            .unwrap_err();
        assert_eq!(err.var, ENDPOINT_URL_VAR);
    }
}
