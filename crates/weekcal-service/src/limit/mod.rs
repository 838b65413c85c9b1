//! RateLimiter: sans-io, per-client fixed window request limiter.

use std::{
    collections::HashMap,
    fmt::Display,
    net::IpAddr,
    time::{Duration, Instant},
};

#[cfg(test)]
mod tests;

/// Number of tracked clients above which expired windows are pruned.
///
/// Pruning runs at most once per window, so a crowded map costs one scan per window.
const PRUNE_THRESHOLD: usize = 1024;

/// RateLimiter: admits at most `limit` requests per client within each `window`.
///
/// The limiter never reads the clock itself, the caller passes the current
/// [Instant] on every call. A client's window opens on its first request and
/// resets once `window` has elapsed since then.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    clients: HashMap<IpAddr, ClientWindow>,
    last_prune: Option<Instant>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ClientWindow {
    opened: Instant,
    count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RateLimitError {
    /// The client used up its requests for the current window
    ///
    /// `retry_after` is the time left until the window resets.
    Exhausted { retry_after: Duration },
}

impl Display for RateLimitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateLimitError::Exhausted { retry_after } => {
                write!(f, "Rate limit exhausted, retry in {:?}", retry_after)
            }
        }
    }
}

impl RateLimiter {
    /// Create a new RateLimiter admitting `limit` requests per client per `window`
    pub fn new(limit: u32, window: Duration) -> Self {
        debug_assert!(limit > 0, "Limit must be greater than 0 requests");
        debug_assert!(!window.is_zero(), "Window must be longer than zero");
        RateLimiter {
            limit,
            window,
            clients: HashMap::new(),
            last_prune: None,
        }
    }

    /// Record a request from `client` at `now`, failing if its window is exhausted
    pub fn check(&mut self, client: IpAddr, now: Instant) -> Result<(), RateLimitError> {
        if self.clients.len() >= PRUNE_THRESHOLD && self.prune_due(now) {
            self.prune(now);
        }

        let window = self.window;
        let entry = self.clients.entry(client).or_insert(ClientWindow {
            opened: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(entry.opened);
        if elapsed >= window {
            // Previous window is over, start a fresh one
            *entry = ClientWindow {
                opened: now,
                count: 0,
            };
        }

        if entry.count >= self.limit {
            return Err(RateLimitError::Exhausted {
                retry_after: window - now.saturating_duration_since(entry.opened),
            });
        }

        entry.count += 1;
        Ok(())
    }

    fn prune_due(&self, now: Instant) -> bool {
        self.last_prune
            .is_none_or(|last| now.saturating_duration_since(last) >= self.window)
    }

    /// Forget every client whose window has expired at `now`
    pub fn prune(&mut self, now: Instant) {
        let window = self.window;
        self.clients
            .retain(|_, w| now.saturating_duration_since(w.opened) < window);
        self.last_prune = Some(now);
    }

    /// Get the number of clients with an open window
    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(60))
    }
}
