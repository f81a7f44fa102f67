//! Rate Limiting Infrastructure
//!
//! Fixed-window request counters keyed by client identifier.
//!
//! A window opens on the first request after the previous one elapsed and
//! lasts `window` from that moment. Because windows are not sliding, a client
//! can get up to `2 * max_requests` through across a window boundary. That is
//! accepted behaviour of this limiter.

use dashmap::DashMap;
use std::time::Duration;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    pub fn window_ms(&self) -> i64 {
        i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX)
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    /// Whole seconds until the window resets, rounded up, at least 1
    pub fn retry_after_secs(&self, now_ms: i64) -> u64 {
        let remaining_ms = (self.reset_at_ms - now_ms).max(0) as u64;
        remaining_ms.div_ceil(1000).max(1)
    }
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count one request for `key` at `now_ms`.
    ///
    /// Rejected requests are not counted.
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now_ms: i64,
    ) -> RateLimitResult;
}

/// Counter state of one client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitWindow {
    pub count: u32,
    pub reset_at_ms: i64,
}

/// Process-local rate limit table
///
/// Each key's check-then-increment runs under that key's shard lock, so
/// concurrent requests from one client cannot push `count` past the limit.
#[derive(Debug, Default)]
pub struct MemoryRateLimiter {
    windows: DashMap<String, RateLimitWindow>,
}

impl MemoryRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous core of [`RateLimitStore::check_and_increment`]
    pub fn check(&self, key: &str, config: &RateLimitConfig, now_ms: i64) -> RateLimitResult {
        let mut window = self
            .windows
            .entry(key.to_string())
            .or_insert(RateLimitWindow {
                count: 0,
                reset_at_ms: now_ms.saturating_add(config.window_ms()),
            });

        if now_ms > window.reset_at_ms {
            window.count = 0;
            window.reset_at_ms = now_ms.saturating_add(config.window_ms());
        }

        if window.count >= config.max_requests {
            tracing::debug!(key = %key, count = window.count, "Rate limit exceeded");
            return RateLimitResult {
                allowed: false,
                limit: config.max_requests,
                remaining: 0,
                reset_at_ms: window.reset_at_ms,
            };
        }

        window.count += 1;
        RateLimitResult {
            allowed: true,
            limit: config.max_requests,
            remaining: config.max_requests - window.count,
            reset_at_ms: window.reset_at_ms,
        }
    }

    /// Current window of `key`, if any
    pub fn window(&self, key: &str) -> Option<RateLimitWindow> {
        self.windows.get(key).map(|w| *w)
    }

    /// Drop windows that have already elapsed; returns how many were removed
    pub fn cleanup(&self, now_ms: i64) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, w| now_ms <= w.reset_at_ms);
        before.saturating_sub(self.windows.len())
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl RateLimitStore for MemoryRateLimiter {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now_ms: i64,
    ) -> RateLimitResult {
        self.check(key, config, now_ms)
    }
}
