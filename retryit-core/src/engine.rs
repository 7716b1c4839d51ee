use tokio::time;
use tracing::{debug, error, info, warn};

use crate::RetryConfig;
use crate::process::{AttemptOutcome, CommandLine};

const SPAWN_FAILURE_CODE: i32 = 127;

/// Runs `primary` until it succeeds or the retry budget is exhausted and
/// returns the exit code for the wrapper process. `config` must have passed
/// [`RetryConfig::validate`].
pub async fn run(
    config: &RetryConfig,
    primary: &CommandLine,
    fail: Option<&CommandLine>,
) -> i32 {
    let backoff = config.backoff();
    let mut attempts: u32 = 0;

    let outcome = loop {
        if attempts > 0 {
            info!(
                "Before retry #{}: sleeping {} seconds",
                attempts,
                backoff.delay_secs(attempts)
            );
            time::sleep(backoff.delay(attempts)).await;
        }

        let outcome = primary.run().await;
        attempts += 1;

        match outcome {
            AttemptOutcome::FailedWithStatus(_) if attempts <= config.max_tries => {}
            _ => break outcome,
        }
    };

    match outcome {
        AttemptOutcome::Succeeded(status) => {
            debug!("Command succeeded after {} attempts", attempts);
            status.exit_code()
        }
        AttemptOutcome::FailedToStart(err) => {
            error!(
                "Command Failed: {} ({})",
                primary.program().to_string_lossy(),
                err
            );
            SPAWN_FAILURE_CODE
        }
        AttemptOutcome::FailedWithStatus(status) => {
            match fail {
                Some(fail_command) => {
                    warn!("Retries exhausted, running fail script");
                    if let AttemptOutcome::FailedToStart(err) = fail_command.run().await {
                        warn!(
                            "Fail script could not be started: {} ({})",
                            fail_command.program().to_string_lossy(),
                            err
                        );
                    }
                }
                None => warn!("Retries exhausted"),
            }
            // The exit status comes from the last primary attempt, never
            // from the fail command.
            status.exit_code()
        }
    }
}
