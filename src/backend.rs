//! Robot web interface endpoints and the background request driver.
//!
//! Requests are fire-and-forget: [`Poller::request`] spawns the call onto the
//! tokio runtime and the result comes back as a [`Completion`] on a channel the
//! render loop drains once per frame. There are no retries and nothing is
//! cancelled; a late response is still delivered.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use telemetry_common::Feed;
use tokio::runtime::Handle;
use tracing::trace;

use crate::error::FetchError;

/// A route on the robot web interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Battery level, numeric string (percent).
    Battery,
    /// Charging flag, numeric string (0/1).
    Charging,
    /// Pending log messages, JSON array of `[severity, source, body]`.
    Logging,
    /// One sweep, JSON object `"<angle>" -> [distance, intensity, error]`.
    LidarScan,
    /// Sensor running flag, numeric string (0/1).
    LidarActive,
    /// Start the sensor. POST, response ignored.
    LidarActivate,
}

impl Endpoint {
    /// Path relative to the backend base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::Charging => "charging",
            Self::Logging => "logging",
            Self::LidarScan => "lidar/scan",
            Self::LidarActive => "lidar/active",
            Self::LidarActivate => "lidar/activate",
        }
    }

    #[inline]
    pub const fn is_post(self) -> bool { matches!(self, Self::LidarActivate) }

    /// Endpoint polled for a scheduled feed. The LIDAR feed polls the
    /// activation flag; the scan itself is fetched only after it confirms.
    pub const fn for_feed(feed: Feed) -> Self {
        match feed {
            Feed::Battery => Self::Battery,
            Feed::Charging => Self::Charging,
            Feed::Logs => Self::Logging,
            Feed::Lidar => Self::LidarActive,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Source of response bodies.
pub trait Backend: Send + Sync + 'static {
    /// Perform one request and return the raw body.
    fn request(
        &self,
        endpoint: Endpoint,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Backend talking to the robot over HTTP.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn url(
        &self,
        endpoint: Endpoint,
    ) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

impl Backend for HttpBackend {
    async fn request(
        &self,
        endpoint: Endpoint,
    ) -> Result<String, FetchError> {
        let url = self.url(endpoint);
        let builder = if endpoint.is_post() {
            self.client.post(&url)
        } else {
            self.client.get(&url)
        };

        let response = builder
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })
    }
}

/// Result of one request, delivered to the render thread.
#[derive(Debug)]
pub struct Completion {
    pub endpoint: Endpoint,
    pub result: Result<String, FetchError>,
}

/// Spawns requests and forwards their completions.
pub struct Poller<B> {
    backend: Arc<B>,
    runtime: Handle,
    completions: Sender<Completion>,
}

impl<B: Backend> Poller<B> {
    pub fn new(
        backend: B,
        runtime: Handle,
        completions: Sender<Completion>,
    ) -> Self {
        Self {
            backend: Arc::new(backend),
            runtime,
            completions,
        }
    }

    /// Start a request in the background.
    pub fn request(
        &self,
        endpoint: Endpoint,
    ) {
        let backend = Arc::clone(&self.backend);
        let completions = self.completions.clone();
        trace!(%endpoint, "request spawned");
        self.runtime.spawn(async move {
            let result = backend.request(endpoint).await;
            // The receiver only goes away when the window closes.
            let _ = completions.send(Completion { endpoint, result });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    struct EchoBackend;

    impl Backend for EchoBackend {
        async fn request(
            &self,
            endpoint: Endpoint,
        ) -> Result<String, FetchError> {
            Ok(endpoint.path().to_owned())
        }
    }

    #[test]
    fn test_paths_and_methods() {
        assert_eq!(Endpoint::LidarScan.to_string(), "lidar/scan");
        assert!(Endpoint::LidarActivate.is_post());
        assert!(!Endpoint::LidarActive.is_post());
    }

    #[test]
    fn test_lidar_feed_polls_activation_flag() {
        assert_eq!(Endpoint::for_feed(Feed::Lidar), Endpoint::LidarActive);
        assert_eq!(Endpoint::for_feed(Feed::Logs), Endpoint::Logging);
    }

    #[test]
    fn test_http_urls_join_cleanly() {
        let backend = HttpBackend::new("http://robot.local:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.url(Endpoint::Battery), "http://robot.local:5000/battery");
        assert_eq!(backend.url(Endpoint::LidarActivate), "http://robot.local:5000/lidar/activate");
    }

    #[test]
    fn test_poller_delivers_completion() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let (tx, rx) = mpsc::channel();
        let poller = Poller::new(EchoBackend, runtime.handle().clone(), tx);

        poller.request(Endpoint::Charging);

        let completion = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(completion.endpoint, Endpoint::Charging);
        assert_eq!(completion.result.unwrap(), "charging");
    }
}
