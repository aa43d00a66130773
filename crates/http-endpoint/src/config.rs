use std::time::Duration;

/// The URL used when none is configured.
pub const DEFAULT_URL: &str = "http://localhost:8000/chat";

/// Builder for [`HttpEndpointConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HttpEndpointConfigBuilder {
    url: Option<String>,
    timeout: Option<Duration>,
}

impl HttpEndpointConfigBuilder {
    /// Creates a builder with everything left at its default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the full URL messages are posted to.
    #[inline]
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Gives up on a request after `timeout`.
    ///
    /// Without this, a request that never answers keeps the session busy
    /// for as long as the connection stays open.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpEndpointConfig {
        HttpEndpointConfig {
            url: self.url.unwrap_or_else(|| DEFAULT_URL.to_string()),
            timeout: self.timeout,
        }
    }
}

/// Configuration for [`crate::HttpEndpoint`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpEndpointConfig {
    pub(crate) url: String,
    pub(crate) timeout: Option<Duration>,
}

impl HttpEndpointConfig {
    /// Returns the URL messages are posted to.
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the request timeout, if any.
    #[inline]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for HttpEndpointConfig {
    #[inline]
    fn default() -> Self {
        HttpEndpointConfigBuilder::new().build()
    }
}
