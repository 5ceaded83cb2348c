//! Hop transport and clock seams.
//!
//! The analyzer only ever needs "request one URL without following redirects"
//! and "what time is it", so both are traits. Production code uses reqwest and
//! `Instant`; tests substitute deterministic doubles.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error_handling::{categorize_reqwest_error, HopError};

/// Status and `Location` header of one hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw `Location` header, if present
    pub location: Option<String>,
}

/// Resolves one hop: a single request with redirects disabled.
#[async_trait]
pub trait HopTransport: Send + Sync {
    /// Requests `url` once and reports status and `Location`.
    async fn fetch(&self, url: &str) -> Result<HopResponse, HopError>;
}

/// Monotonic time source used to measure hop durations.
pub trait Clock: Send + Sync {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// `Clock` backed by `std::time::Instant`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// HEAD-request transport over a reqwest client.
///
/// The client must be built with `redirect::Policy::none()` (see
/// `init_redirect_client`), otherwise reqwest follows redirects itself and the
/// chain collapses into a single hop.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Arc<reqwest::Client>,
}

impl ReqwestTransport {
    /// Wraps a client built with redirects disabled.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HopTransport for ReqwestTransport {
    async fn fetch(&self, url: &str) -> Result<HopResponse, HopError> {
        let resp = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&e))?;

        let location = resp
            .headers()
            .get(reqwest::header::LOCATION)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

        Ok(HopResponse {
            status: resp.status().as_u16(),
            location,
        })
    }
}
