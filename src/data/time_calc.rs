//! File/code adapted from https://github.com/jamjamjon/usls

use std::time::Duration;

/// Accumulates per-stage durations over repeated runs.
///
/// Stage `i` is pushed once per run, so `n()` is the number of completed runs.
#[derive(Debug, Default, Clone)]
pub struct TimeCalc {
    n: usize,
    duration: Vec<Duration>,
}

impl TimeCalc {
    pub fn total(&self) -> Duration {
        self.duration.iter().sum::<Duration>()
    }

    pub fn n(&self) -> usize {
        match self.duration.len() {
            0 => 0,
            stages => self.n / stages,
        }
    }

    pub fn avg(&self) -> Duration {
        match self.n() {
            0 => Duration::ZERO,
            n => self.total() / n as u32,
        }
    }

    /// Average time of stage `i`, if that stage was ever recorded.
    pub fn avg_i(&self, i: usize) -> Option<Duration> {
        let d = self.duration.get(i)?;
        match self.n() {
            0 => None,
            n => Some(*d / n as u32),
        }
    }

    pub fn ts(&self) -> &[Duration] {
        &self.duration
    }

    pub fn add_or_push(&mut self, i: usize, x: Duration) {
        match self.duration.get_mut(i) {
            Some(elem) => *elem += x,
            None => {
                if i >= self.duration.len() {
                    self.duration.push(x)
                }
            }
        }
        self.n += 1;
    }

    pub fn clear(&mut self) {
        self.n = Default::default();
        self.duration = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_calc_averages() {
        let mut tc = TimeCalc::default();
        assert_eq!(tc.avg(), Duration::ZERO);
        assert_eq!(tc.avg_i(0), None);

        for _ in 0..2 {
            tc.add_or_push(0, Duration::from_millis(10));
            tc.add_or_push(1, Duration::from_millis(30));
        }
        assert_eq!(tc.n(), 2);
        assert_eq!(tc.total(), Duration::from_millis(80));
        assert_eq!(tc.avg(), Duration::from_millis(40));
        assert_eq!(tc.avg_i(1), Some(Duration::from_millis(30)));

        tc.clear();
        assert_eq!(tc.n(), 0);
    }
}
