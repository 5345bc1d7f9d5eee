use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use tracing_subscriber::fmt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the global subscriber.
///
/// 0 = info, 1 = debug (hyper connection noise suppressed), 2+ = trace.
/// `RUST_LOG` wins over the verbosity flags unless `quiet` is set.
pub fn init_logging(verbose_level: u8, quiet: bool) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        let default = match verbose_level {
            0 => "info",
            1 => "debug,hyper=warn,reqwest=info",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    let json = json_output(
        std::env::var("RUST_LOG_JSON").ok().as_deref(),
        io::stderr().is_terminal(),
    );

    let registry = Registry::default().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).try_init()?;
    }

    Ok(())
}

/// `RUST_LOG_JSON=true` forces JSON; unset, JSON whenever stderr is not a terminal.
fn json_output(env_value: Option<&str>, stderr_is_terminal: bool) -> bool {
    match env_value {
        Some(value) => value == "true",
        None => !stderr_is_terminal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("true"), true, true)]
    #[case(Some("false"), false, false)]
    #[case(None, true, false)]
    #[case(None, false, true)]
    fn test_json_output(
        #[case] env_value: Option<&str>,
        #[case] stderr_is_terminal: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(json_output(env_value, stderr_is_terminal), expected);
    }
}
