use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("max_tries must be greater than 0")]
    InvalidTries,

    #[error("sleep amount {0} is not a valid duration in seconds")]
    InvalidSleep(f64),

    #[error("minimum sleep cannot be greater than maximum sleep")]
    SleepRange,

    #[error("fail script (-f) must be combined with execution script (-e)")]
    FailWithoutExecute,

    #[error("fail script not defined")]
    EmptyFailCommand,

    #[error("unknown execute command")]
    MissingCommand,

    #[error("{0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, Error>;
