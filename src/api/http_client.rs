//! HTTP client construction for the image generation API
//!
//! Image generation is slow compared to ordinary API calls, so the request
//! timeout is generous while the connect timeout stays short.

use reqwest::Client;
use std::time::Duration;

pub struct ImageClientConfig {
    /// Overall request timeout (default: 2 minutes)
    pub timeout: Duration,
    /// Connection timeout (default: 15 seconds)
    pub connect_timeout: Duration,
    /// Pool idle timeout (default: 90 seconds)
    pub pool_idle_timeout: Duration,
    /// TCP keep-alive (default: 60 seconds)
    pub tcp_keepalive: Duration,
}

impl Default for ImageClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(15),
            pool_idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Duration::from_secs(60),
        }
    }
}

impl ImageClientConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

pub fn user_agent() -> String {
    format!("heritage-gallery/{}", env!("CARGO_PKG_VERSION"))
}

/// Create the client used for generateContent calls
pub fn create_image_client(config: ImageClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(config.pool_idle_timeout)
        .pool_max_idle_per_host(2)
        .tcp_keepalive(config.tcp_keepalive)
        .user_agent(user_agent())
        .build()
}
