use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    min_sleep: f64,
    max_sleep: f64,
    constant_sleep: Option<f64>,
}

impl Backoff {
    pub fn new(min_sleep: f64, max_sleep: f64, constant_sleep: Option<f64>) -> Self {
        Self {
            min_sleep,
            max_sleep,
            constant_sleep,
        }
    }

    // Attempts are 1-based: delay_secs(1) is the pause after the first
    // failed attempt and equals min_sleep.
    pub fn delay_secs(&self, attempt: u32) -> f64 {
        if let Some(secs) = self.constant_sleep {
            return secs;
        }

        // 2^1023 is the last power of two representable in f64.
        let exponent = attempt.saturating_sub(1).min(1023) as i32;
        let raw = self.min_sleep * 2f64.powi(exponent);
        if !raw.is_finite() || raw > self.max_sleep {
            self.max_sleep
        } else {
            raw
        }
    }

    pub fn delay(&self, attempt: u32) -> Duration {
        // Cannot panic for bounds that passed RetryConfig::validate: the
        // schedule never yields more seconds than the largest of them.
        Duration::from_secs_f64(self.delay_secs(attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubles_from_min_sleep() {
        let backoff = Backoff::new(1.0, 100.0, None);

        assert_eq!(backoff.delay_secs(1), 1.0);
        assert_eq!(backoff.delay_secs(2), 2.0);
        assert_eq!(backoff.delay_secs(3), 4.0);
        assert_eq!(backoff.delay_secs(4), 8.0);
    }

    #[test]
    fn test_capped_at_max_sleep() {
        let backoff = Backoff::new(1.0, 5.0, None);

        assert_eq!(backoff.delay_secs(3), 4.0);
        assert_eq!(backoff.delay_secs(4), 5.0);
        assert_eq!(backoff.delay_secs(10), 5.0);
        assert_eq!(backoff.delay_secs(1000), 5.0);
    }

    #[test]
    fn test_default_curve_starts_at_min() {
        let backoff = Backoff::new(0.3, 60.0, None);

        assert_eq!(backoff.delay_secs(1), 0.3);
        assert_eq!(backoff.delay_secs(2), 0.6);
        assert_eq!(backoff.delay_secs(9), 60.0);
    }

    #[test]
    fn test_monotonically_non_decreasing() {
        let backoff = Backoff::new(0.3, 60.0, None);

        let mut last = 0.0;
        for attempt in 1..=40 {
            let delay = backoff.delay_secs(attempt);
            assert!(delay >= last, "delay shrank at attempt {attempt}");
            assert!(delay <= 60.0);
            last = delay;
        }
    }

    #[test]
    fn test_constant_overrides_curve() {
        let backoff = Backoff::new(0.3, 60.0, Some(2.5));

        for attempt in 1..=20 {
            assert_eq!(backoff.delay_secs(attempt), 2.5);
        }
    }

    #[test]
    fn test_huge_attempt_stays_finite() {
        let backoff = Backoff::new(0.3, 60.0, None);

        assert_eq!(backoff.delay_secs(u32::MAX), 60.0);
        assert_eq!(backoff.delay(u32::MAX), Duration::from_secs(60));
    }

    #[test]
    fn test_delay_never_exceeds_validated_bounds() {
        // The cap keeps every delay convertible whenever the bounds
        // themselves are.
        let backoff = Backoff::new(3.0, 1e19, None);

        for attempt in [1, 2, 30, 64, 1024, u32::MAX] {
            let secs = backoff.delay_secs(attempt);
            assert!(secs <= 1e19);
            assert!(Duration::try_from_secs_f64(secs).is_ok());
        }

        let constant = Backoff::new(0.3, 60.0, Some(1e19));
        assert!(Duration::try_from_secs_f64(constant.delay_secs(7)).is_ok());
    }

    #[test]
    fn test_delay_as_duration() {
        let backoff = Backoff::new(2.0, 60.0, None);

        assert_eq!(backoff.delay(1), Duration::from_secs(2));
        assert_eq!(backoff.delay(2), Duration::from_secs(4));
    }
}
