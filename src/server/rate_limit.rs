//! Per-client request-rate tracking for the analyze route.
//!
//! Fixed one-minute windows keyed by client address. The map never holds
//! more than `max_tracked` clients: expired windows are swept before a new
//! client is admitted, and if every window is still live the oldest one is
//! evicted.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use super::error::ApiError;
use super::AppState;

/// Upper bound on tracked clients.
pub const MAX_TRACKED_CLIENTS: usize = 10_000;

const WINDOW: Duration = Duration::from_secs(60);

struct Window {
    started: Instant,
    count: u32,
}

/// Bounded, process-local request counter.
pub struct RequestRateTracker {
    windows: Mutex<HashMap<String, Window>>,
    limit: u32,
    window: Duration,
    max_tracked: usize,
}

impl RequestRateTracker {
    /// Allow `limit` requests per client per minute. A limit of 0 disables tracking.
    pub fn new(limit: u32) -> Self {
        Self::with_window(limit, WINDOW, MAX_TRACKED_CLIENTS)
    }

    pub fn with_window(limit: u32, window: Duration, max_tracked: usize) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            limit,
            window,
            max_tracked,
        }
    }

    /// Record a request from `client`; false if it is over the limit.
    pub fn check(&self, client: &str) -> bool {
        if self.limit == 0 {
            return true;
        }

        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        if !windows.contains_key(client) && windows.len() >= self.max_tracked {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < window);

            if windows.len() >= self.max_tracked {
                let oldest = windows
                    .iter()
                    .min_by_key(|(_, w)| w.started)
                    .map(|(key, _)| key.clone());
                if let Some(key) = oldest {
                    windows.remove(&key);
                }
            }
        }

        let entry = windows.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }
        entry.count = entry.count.saturating_add(1);
        entry.count <= self.limit
    }

    /// Number of clients currently tracked.
    pub fn tracked(&self) -> usize {
        self.windows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Identify the caller: first `x-forwarded-for` hop, else the peer address.
fn client_key(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware rejecting clients over their per-minute budget.
pub async fn limit_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_key(&request);
    if !state.rate_limiter.check(&client) {
        warn!("Rate limit exceeded for {}", client);
        return ApiError::TooManyRequests.into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_limit_per_client() {
        let tracker = RequestRateTracker::new(2);
        assert!(tracker.check("a"));
        assert!(tracker.check("a"));
        assert!(!tracker.check("a"));
        assert!(tracker.check("b"));
    }

    #[test]
    fn test_zero_disables() {
        let tracker = RequestRateTracker::new(0);
        for _ in 0..100 {
            assert!(tracker.check("a"));
        }
        assert_eq!(tracker.tracked(), 0);
    }

    #[test]
    fn test_window_resets() {
        let tracker = RequestRateTracker::with_window(1, Duration::from_millis(20), 100);
        assert!(tracker.check("a"));
        assert!(!tracker.check("a"));
        std::thread::sleep(Duration::from_millis(30));
        assert!(tracker.check("a"));
    }

    #[test]
    fn test_sweep_bounds_memory() {
        let tracker = RequestRateTracker::with_window(5, Duration::from_millis(20), 3);
        for client in ["a", "b", "c"] {
            tracker.check(client);
        }
        assert_eq!(tracker.tracked(), 3);
        std::thread::sleep(Duration::from_millis(30));
        assert!(tracker.check("d"));
        assert_eq!(tracker.tracked(), 1);
    }

    #[test]
    fn test_live_clients_stay_bounded() {
        let tracker = RequestRateTracker::with_window(1, Duration::from_secs(60), 3);
        for i in 0..100 {
            assert!(tracker.check(&format!("client-{}", i)));
            assert!(tracker.tracked() <= 3);
        }
        assert_eq!(tracker.tracked(), 3);

        // The newest clients keep their windows.
        assert!(!tracker.check("client-99"));
    }

    #[test]
    fn test_client_key() {
        let req = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_key(&req), "203.0.113.7");

        let mut req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_key(&req), "unknown");
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 4000))));
        assert_eq!(client_key(&req), "192.0.2.1");
    }
}
