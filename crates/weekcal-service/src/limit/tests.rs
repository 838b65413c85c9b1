//! Test module for the rate limiter.

use std::net::{Ipv4Addr, Ipv6Addr};

use super::*;

fn client(last: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(192, 0, 2, last))
}

#[test]
fn rate_limiter_rejects_invalid_config() {
    let limiter = RateLimiter::new(3, Duration::from_secs(10));
    assert_eq!(limiter.limit(), 3);
    assert_eq!(limiter.window(), Duration::from_secs(10));

    if cfg!(debug_assertions) {
        let result = std::panic::catch_unwind(|| {
            RateLimiter::new(0, Duration::from_secs(10));
        });
        assert!(result.is_err(), "Expected panic for a zero limit");

        let result = std::panic::catch_unwind(|| {
            RateLimiter::new(3, Duration::ZERO);
        });
        assert!(result.is_err(), "Expected panic for a zero window");
    }
}

#[test]
fn rate_limiter_admits_up_to_limit() {
    let mut limiter = RateLimiter::default();
    let start = Instant::now();

    for i in 0..5 {
        let now = start + Duration::from_secs(i);
        assert!(limiter.check(client(1), now).is_ok(), "request {i} rejected");
    }

    let result = limiter.check(client(1), start + Duration::from_secs(20));
    match result {
        Err(RateLimitError::Exhausted { retry_after }) => {
            assert_eq!(retry_after, Duration::from_secs(40));
        }
        _ => panic!("Expected Exhausted error, got {:?}", result),
    }
}

#[test]
fn rate_limiter_resets_after_window() {
    let mut limiter = RateLimiter::new(2, Duration::from_secs(60));
    let start = Instant::now();

    assert!(limiter.check(client(1), start).is_ok());
    assert!(limiter.check(client(1), start).is_ok());
    assert!(limiter.check(client(1), start + Duration::from_secs(59)).is_err());

    // Exactly one window later the client starts over
    let later = start + Duration::from_secs(60);
    assert!(limiter.check(client(1), later).is_ok());
    assert!(limiter.check(client(1), later).is_ok());
    assert!(limiter.check(client(1), later).is_err());
}

#[test]
fn rate_limiter_tracks_clients_independently() {
    let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
    let now = Instant::now();
    let v6 = IpAddr::V6(Ipv6Addr::LOCALHOST);

    assert!(limiter.check(client(1), now).is_ok());
    assert!(limiter.check(client(1), now).is_err());
    assert!(limiter.check(client(2), now).is_ok());
    assert!(limiter.check(v6, now).is_ok());
    assert_eq!(limiter.tracked_clients(), 3);
}

#[test]
fn rate_limiter_rejections_do_not_extend_window() {
    let mut limiter = RateLimiter::new(1, Duration::from_secs(10));
    let start = Instant::now();

    assert!(limiter.check(client(1), start).is_ok());
    for i in 1..10 {
        assert!(
            limiter
                .check(client(1), start + Duration::from_secs(i))
                .is_err()
        );
    }
    assert!(
        limiter
            .check(client(1), start + Duration::from_secs(10))
            .is_ok()
    );
}

#[test]
fn rate_limiter_prunes_expired_windows() {
    let mut limiter = RateLimiter::new(1, Duration::from_secs(10));
    let start = Instant::now();

    assert!(limiter.check(client(1), start).is_ok());
    assert!(limiter.check(client(2), start + Duration::from_secs(5)).is_ok());

    limiter.prune(start + Duration::from_secs(12));
    assert_eq!(limiter.tracked_clients(), 1);

    limiter.prune(start + Duration::from_secs(15));
    assert_eq!(limiter.tracked_clients(), 0);
}

#[test]
fn rate_limiter_prunes_when_crowded() {
    let mut limiter = RateLimiter::new(1, Duration::from_secs(10));
    let start = Instant::now();

    for i in 0..PRUNE_THRESHOLD {
        let ip = IpAddr::V6(Ipv6Addr::from(i as u128));
        assert!(limiter.check(ip, start).is_ok());
    }
    assert_eq!(limiter.tracked_clients(), PRUNE_THRESHOLD);

    // All previous windows expired, only the new client remains
    assert!(limiter.check(client(1), start + Duration::from_secs(11)).is_ok());
    assert_eq!(limiter.tracked_clients(), 1);
}

#[test]
fn rate_limiter_prunes_at_most_once_per_window() {
    let mut limiter = RateLimiter::new(1, Duration::from_secs(10));
    let start = Instant::now();
    let ip = |i: usize| IpAddr::V6(Ipv6Addr::from(i as u128));

    // Crowd the map, then let it prune once everything expired
    for i in 0..PRUNE_THRESHOLD {
        assert!(limiter.check(ip(i), start).is_ok());
    }
    let pruned_at = start + Duration::from_secs(11);
    assert!(limiter.check(client(1), pruned_at).is_ok());
    assert_eq!(limiter.tracked_clients(), 1);

    // Crowd it again right away: no scan until a window has passed since the last one
    for i in 0..PRUNE_THRESHOLD - 1 {
        assert!(limiter.check(ip(PRUNE_THRESHOLD + i), pruned_at).is_ok());
    }
    assert_eq!(limiter.tracked_clients(), PRUNE_THRESHOLD);
    let soon = pruned_at + Duration::from_secs(4);
    assert!(limiter.check(client(2), soon).is_ok());
    assert_eq!(limiter.tracked_clients(), PRUNE_THRESHOLD + 1);

    // A window after the last scan, everything opened at `pruned_at` expires
    let later = pruned_at + Duration::from_secs(10);
    assert!(limiter.check(client(3), later).is_ok());
    assert_eq!(limiter.tracked_clients(), 2);
}
