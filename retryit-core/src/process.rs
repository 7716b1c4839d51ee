use std::ffi::{OsStr, OsString};

use tokio::process::Command;

// Argv is kept as OsString end to end so command arguments that are not
// valid Unicode still reach the child byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    argv: Vec<OsString>,
}

impl CommandLine {
    pub fn new<I, S>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let argv: Vec<OsString> = tokens.into_iter().map(Into::into).collect();
        if argv.is_empty() { None } else { Some(Self { argv }) }
    }

    pub fn program(&self) -> &OsStr {
        &self.argv[0]
    }

    pub fn args(&self) -> &[OsString] {
        &self.argv[1..]
    }

    pub async fn run(&self) -> AttemptOutcome {
        tracing::debug!(
            "Executing command: program='{}', args={:?}",
            self.program().to_string_lossy(),
            self.args()
        );

        // Stdio is inherited so child output flows straight through.
        match Command::new(self.program()).args(self.args()).status().await {
            Ok(status) => {
                let status = ExitStatus::from_std(status);
                if status.success() {
                    AttemptOutcome::Succeeded(status)
                } else {
                    AttemptOutcome::FailedWithStatus(status)
                }
            }
            Err(err) => AttemptOutcome::FailedToStart(err),
        }
    }
}

#[derive(Debug)]
pub enum AttemptOutcome {
    Succeeded(ExitStatus),
    FailedWithStatus(ExitStatus),
    FailedToStart(std::io::Error),
}

impl AttemptOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    code: Option<i32>,
    signal: Option<i32>,
}

impl ExitStatus {
    pub fn from_std(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
            #[cfg(unix)]
            signal: {
                use std::os::unix::process::ExitStatusExt;
                status.signal()
            },
            #[cfg(not(unix))]
            signal: None,
        }
    }

    #[cfg(test)]
    pub fn new(code: Option<i32>, signal: Option<i32>) -> Self {
        Self { code, signal }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn signal(&self) -> Option<i32> {
        self.signal
    }

    pub fn exit_code(&self) -> i32 {
        match (self.code, self.signal) {
            (Some(code), _) => code,
            (None, Some(signal)) => 128 + signal,
            (None, None) => 1,
        }
    }
}
