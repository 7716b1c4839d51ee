mod cli;

use retryit_core::engine;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Diagnostics go to stderr; stdout belongs to the wrapped command.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // args_os keeps argument bytes intact even when they are not valid UTF-8.
    let tokens: Vec<std::ffi::OsString> = std::env::args_os().skip(1).collect();

    match cli::split(&tokens)? {
        cli::Invocation::Help => {
            cli::print_usage()?;
            Ok(())
        }
        cli::Invocation::Run {
            config,
            fail_command,
            primary_command,
        } => {
            tracing::debug!(
                "Parsed invocation: max_tries={}, command='{}'",
                config.max_tries,
                primary_command.program().to_string_lossy()
            );

            let code = engine::run(&config, &primary_command, fail_command.as_ref()).await;
            std::process::exit(code);
        }
    }
}
