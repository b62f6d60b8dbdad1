// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based request pacing for Alloy RPC providers.
//!
//! Bulk backfills issue one `eth_getBlockByNumber` per block across many
//! concurrent workers, which public endpoints throttle aggressively. This
//! layer enforces a minimum spacing between consecutive requests across all
//! clones of the service, smoothing the burst into a steady rate.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use tokio::sync::Mutex;
use tokio::time::Instant;
use tower::Layer;

/// A Tower layer that spaces requests a fixed interval apart.
///
/// Unlike a token bucket there is no burst allowance: request `n + 1` may
/// not start earlier than `interval` after request `n` was released,
/// regardless of which worker issued it.
///
/// # Example
///
/// ```rust,ignore
/// use semioindex::transport::ThrottleLayer;
/// use alloy_rpc_client::ClientBuilder;
///
/// // At most 20 requests per second, evenly spaced
/// let client = ClientBuilder::default()
///     .layer(ThrottleLayer::per_second(20))
///     .http(rpc_url);
/// ```
#[derive(Clone, Debug)]
pub struct ThrottleLayer {
    interval: Duration,
    next_slot: Arc<Mutex<Instant>>,
}

impl ThrottleLayer {
    /// Space requests at least `interval` apart.
    #[must_use]
    pub fn with_min_delay(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Allow at most `requests` per second, evenly spaced.
    ///
    /// # Example
    ///
    /// ```rust
    /// use semioindex::transport::ThrottleLayer;
    ///
    /// // 50ms between requests
    /// let layer = ThrottleLayer::per_second(20);
    /// ```
    #[must_use]
    pub fn per_second(requests: u32) -> Self {
        let requests = requests.max(1);
        Self::with_min_delay(Duration::from_secs(1) / requests)
    }
}

impl<S> Layer<S> for ThrottleLayer {
    type Service = ThrottleService<S>;

    fn layer(&self, service: S) -> Self::Service {
        ThrottleService {
            service,
            interval: self.interval,
            next_slot: self.next_slot.clone(),
        }
    }
}

/// A Tower service that delays each request until its time slot.
#[derive(Clone, Debug)]
pub struct ThrottleService<S> {
    service: S,
    interval: Duration,
    next_slot: Arc<Mutex<Instant>>,
}

impl<S, Request> tower::Service<Request> for ThrottleService<S>
where
    S: tower::Service<Request> + Clone + Send + 'static,
    S::Future: Send,
    Request: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let interval = self.interval;
        let next_slot = self.next_slot.clone();
        let mut service = self.service.clone();

        Box::pin(async move {
            // Claim the next slot under the lock, then wait outside it so
            // queued callers can claim subsequent slots meanwhile.
            let slot = {
                let mut next = next_slot.lock().await;
                let now = Instant::now();
                let slot = (*next).max(now);
                *next = slot + interval;
                slot
            };
            tokio::time::sleep_until(slot).await;

            service.call(request).await
        })
    }
}
