use std::time::{Duration, Instant};

/// Logs the time spent since `prev` and returns the total elapsed since `start`.
pub(crate) fn trace(l_type: &str, l_step: &str, start: Instant, prev: Duration) -> Duration {
    let elapsed = start.elapsed();
    log::trace!("{} | Total={:.2?} | {}={:.2?}", l_type, elapsed, l_step, elapsed.saturating_sub(prev));
    elapsed
}
