//! The seam between the client and whatever performs the HTTP GET.
//!
//! A transport takes a fully rendered URL and returns the raw body or its
//! own error. Non-2xx replies are the transport's business: the client
//! never retries, times out, or reinterprets what comes back.

use std::future::Future;

/// Asynchronous "GET this URL" capability.
pub trait Transport {
    type Error;

    fn get(&self, url: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use std::time::Duration;

    use super::Transport;

    /// `Transport` backed by a `reqwest::Client`. Non-2xx statuses are
    /// reported as errors via `error_for_status`.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }

        pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
            let client = reqwest::Client::builder().timeout(timeout).build()?;
            Ok(Self { client })
        }
    }

    impl Transport for ReqwestTransport {
        type Error = reqwest::Error;

        async fn get(&self, url: &str) -> Result<String, Self::Error> {
            self.client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        }
    }
}
