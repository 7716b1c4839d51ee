use std::ffi::OsString;

use clap::{ArgAction, CommandFactory, Parser};
use retryit_core::{CommandLine, Error, RetryConfig};

#[derive(Parser, Debug)]
#[command(
    name = "retry",
    about = "Re-runs a command until it succeeds, sleeping between attempts",
    override_usage = "retry [options] [-f fail_script... -e] execute_command...",
    disable_help_flag = true
)]
struct WrapperOpts {
    /// Set max retries: Default 10
    #[arg(short = 't', long = "tries", value_name = "N", allow_negative_numbers = true)]
    tries: Option<u32>,

    /// Constant sleep amount (seconds)
    #[arg(short = 's', long = "sleep", value_name = "SECS", allow_negative_numbers = true)]
    sleep: Option<f64>,

    /// Exponential backoff: minimum sleep amount (seconds): Default 0.3
    #[arg(short = 'm', long = "min", value_name = "SECS", allow_negative_numbers = true)]
    min: Option<f64>,

    /// Exponential backoff: maximum sleep amount (seconds): Default 60
    #[arg(short = 'x', long = "max", value_name = "SECS", allow_negative_numbers = true)]
    max: Option<f64>,

    /// Print usage
    #[arg(
        short = 'h',
        short_alias = '?',
        long = "help",
        action = ArgAction::Help,
        value_parser = clap::value_parser!(bool)
    )]
    help: Option<bool>,
}

#[derive(Debug)]
pub enum Invocation {
    Help,
    Run {
        config: RetryConfig,
        fail_command: Option<CommandLine>,
        primary_command: CommandLine,
    },
}

const HELP_FLAGS: [&str; 3] = ["-h", "-?", "--help"];

/// Splits the raw argument list into wrapper options, an optional fail
/// command, and the primary command.
///
/// The partition is positional: the first `-f` or `-e` token ends the
/// options segment, and the next `-e` after `-f` ends the fail command.
/// A command whose own arguments contain a literal `-f` or `-e` before the
/// real marker is therefore ambiguous and must be wrapped (`sh -c '...'`).
/// Without any marker the whole argument list is the command to run.
pub fn split(tokens: &[OsString]) -> retryit_core::Result<Invocation> {
    match tokens.first() {
        None => return Ok(Invocation::Help),
        Some(first) if HELP_FLAGS.iter().any(|flag| first == flag) => {
            return Ok(Invocation::Help);
        }
        _ => {}
    }

    let Some(marker) = tokens.iter().position(|t| t == "-f" || t == "-e") else {
        let primary = CommandLine::new(tokens.to_vec()).ok_or(Error::MissingCommand)?;
        return Ok(Invocation::Run {
            config: RetryConfig::default(),
            fail_command: None,
            primary_command: primary,
        });
    };

    let Some(config) = parse_wrapper_opts(&tokens[..marker])? else {
        return Ok(Invocation::Help);
    };

    let (fail_command, exec_marker) = if tokens[marker] == "-f" {
        let offset = tokens[marker + 1..]
            .iter()
            .position(|t| t == "-e")
            .ok_or(Error::FailWithoutExecute)?;
        let exec_marker = marker + 1 + offset;
        let fail = CommandLine::new(tokens[marker + 1..exec_marker].to_vec())
            .ok_or(Error::EmptyFailCommand)?;
        (Some(fail), exec_marker)
    } else {
        (None, marker)
    };

    let primary = CommandLine::new(tokens[exec_marker + 1..].to_vec())
        .ok_or(Error::MissingCommand)?;

    config.validate()?;

    Ok(Invocation::Run {
        config,
        fail_command,
        primary_command: primary,
    })
}

// Ok(None) means a help flag was hit inside the segment and usage should be
// printed instead of running anything.
fn parse_wrapper_opts(segment: &[OsString]) -> retryit_core::Result<Option<RetryConfig>> {
    let argv = std::iter::once(OsString::from("retry")).chain(segment.iter().cloned());
    let opts = match WrapperOpts::try_parse_from(argv) {
        Ok(opts) => opts,
        Err(err) if err.kind() == clap::error::ErrorKind::DisplayHelp => return Ok(None),
        Err(err) => return Err(Error::InvalidOption(err.to_string().trim_end().to_string())),
    };

    let mut config = RetryConfig::default();
    if let Some(tries) = opts.tries {
        config.max_tries = tries;
    }
    if let Some(sleep) = opts.sleep {
        config.constant_sleep = Some(sleep);
    }
    if let Some(min) = opts.min {
        config.min_sleep = min;
    }
    if let Some(max) = opts.max {
        config.max_sleep = max;
    }
    Ok(Some(config))
}

pub fn print_usage() -> std::io::Result<()> {
    WrapperOpts::command().print_help()
}
