use std::time::Duration;

use crate::backoff::Backoff;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryConfig {
    // Retries granted after the first attempt; the command runs at most
    // max_tries + 1 times.
    pub max_tries: u32,
    pub min_sleep: f64,
    pub max_sleep: f64,
    pub constant_sleep: Option<f64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_tries: 10,
            min_sleep: 0.3,
            max_sleep: 60.0,
            constant_sleep: None,
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_tries == 0 {
            return Err(crate::Error::InvalidTries);
        }

        // Every sleep must survive the seconds-to-Duration conversion the
        // delay schedule performs later; try_from_secs_f64 rejects NaN,
        // infinities, negatives, and values past the Duration range.
        let sleeps = [Some(self.min_sleep), Some(self.max_sleep), self.constant_sleep];
        for secs in sleeps.into_iter().flatten() {
            if Duration::try_from_secs_f64(secs).is_err() {
                return Err(crate::Error::InvalidSleep(secs));
            }
        }

        if self.max_sleep < self.min_sleep {
            return Err(crate::Error::SleepRange);
        }

        Ok(())
    }

    pub fn backoff(&self) -> Backoff {
        Backoff::new(self.min_sleep, self.max_sleep, self.constant_sleep)
    }
}
