use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use super::*;

#[tokio::test(start_paused = true)]
async fn test_first_acquire_is_immediate() {
    let bucket = TokenBucket::new(1, Duration::from_secs(2));
    let start = Instant::now();
    bucket.acquire().await;
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_second_acquire_waits_one_interval() {
    let bucket = TokenBucket::new(1, Duration::from_secs(2));
    let start = Instant::now();

    bucket.acquire().await;
    bucket.acquire().await;
    assert_eq!(start.elapsed(), Duration::from_secs(2));

    bucket.acquire().await;
    assert_eq!(start.elapsed(), Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_burst_capacity() {
    let bucket = TokenBucket::new(3, Duration::from_secs(1));
    let start = Instant::now();

    for _ in 0..3 {
        bucket.acquire().await;
    }
    assert_eq!(start.elapsed(), Duration::ZERO);

    bucket.acquire().await;
    assert_eq!(start.elapsed(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_tokens_refill_while_idle() {
    let bucket = TokenBucket::new(1, Duration::from_secs(2));
    bucket.acquire().await;

    tokio::time::advance(Duration::from_secs(5)).await;
    let start = Instant::now();
    bucket.acquire().await;
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_idle_time_does_not_exceed_capacity() {
    let bucket = TokenBucket::new(2, Duration::from_secs(1));
    tokio::time::advance(Duration::from_secs(60)).await;

    assert!(bucket.try_acquire());
    assert!(bucket.try_acquire());
    assert!(!bucket.try_acquire());
}

#[tokio::test(start_paused = true)]
async fn test_unlimited_never_waits() {
    let bucket = TokenBucket::unlimited();
    assert!(bucket.is_unlimited());

    let start = Instant::now();
    for _ in 0..100 {
        bucket.acquire().await;
    }
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(bucket.try_acquire());
}

#[tokio::test(start_paused = true)]
async fn test_shared_between_tasks() {
    let bucket = Arc::new(TokenBucket::new(1, Duration::from_millis(500)));
    let start = Instant::now();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let bucket = bucket.clone();
            tokio::spawn(async move { bucket.acquire().await })
        })
        .collect();
    for handle in handles {
        handle.await.expect("task completes");
    }

    assert_eq!(start.elapsed(), Duration::from_millis(1500));
}

#[test]
fn test_zero_capacity_is_clamped() {
    let bucket = TokenBucket::new(0, Duration::from_secs(1));
    assert_eq!(bucket.capacity(), 1);
    assert_eq!(bucket.refill_interval(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_extreme_settings_do_not_overflow() {
    let bucket = TokenBucket::new(u32::MAX, Duration::from_millis(u64::MAX / 1000));
    assert_eq!(bucket.refill_interval(), MAX_REFILL_INTERVAL);

    let start = Instant::now();
    for _ in 0..3 {
        bucket.acquire().await;
    }
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(bucket.try_acquire());
}

#[tokio::test(start_paused = true)]
async fn test_clamped_interval_still_paces_single_token_bucket() {
    let bucket = TokenBucket::new(1, Duration::MAX);
    assert!(bucket.try_acquire());
    assert!(!bucket.try_acquire());

    tokio::time::advance(MAX_REFILL_INTERVAL).await;
    assert!(bucket.try_acquire());
}
