//! Artificial request latency, for load and tracing demos.

use std::time::Duration;

use configs::LatencyConfig;
use rand::Rng;

pub fn pick_delay(config: &LatencyConfig) -> Duration {
    let ms = rand::thread_rng().gen_range(config.min_ms..=config.max_ms);
    Duration::from_millis(ms)
}

/// Sleep for a random delay when enabled. Does not block the worker thread.
pub async fn simulate(config: &LatencyConfig) {
    if !config.enabled {
        return;
    }
    tokio::time::sleep(pick_delay(config)).await;
}
