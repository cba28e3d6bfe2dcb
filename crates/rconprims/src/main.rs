mod duration;
mod exit;
mod logging;
mod output;
mod password;
mod session;

use std::time::Duration;

use clap::Parser;

use crate::duration::parse_duration;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "rcon",
    version,
    about = "Source RCON client",
    after_help = "The password is read from --password, RCON_PASSWORD, or the first line of stdin:\n  \
                  rcon host[:port] [command] <<< rcon_password\n  \
                  echo rcon_password | rcon host[:port] [command]\n\n\
                  Without a command, rcon only reports whether it can authenticate."
)]
struct Cli {
    /// Server address as host[:port]. Port defaults to 25575, host to localhost.
    #[arg(value_name = "HOST[:PORT]")]
    host: String,

    /// Command to run after authenticating. Words are joined with spaces.
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,

    /// RCON password. Read from stdin when not given.
    #[arg(long, env = "RCON_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Maximum time to wait for each reply (e.g. 5s, 500ms; bare numbers are ms).
    #[arg(long, value_name = "DURATION", default_value = "5000ms", value_parser = parse_duration)]
    timeout: Duration,

    /// Maximum time to wait for the TCP connect. Default: OS default.
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    connect_timeout: Option<Duration>,

    /// Maximum time to wait for the password on stdin.
    #[arg(long, value_name = "DURATION", default_value = "5000ms", value_parser = parse_duration)]
    password_timeout: Duration,

    /// Output format for the reply.
    #[arg(long, value_name = "FORMAT", default_value = "raw")]
    format: OutputFormat,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too and are not failures.
            let code = if err.use_stderr() {
                exit::FAILURE
            } else {
                exit::SUCCESS
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format;
    let result = session::run(cli.into(), format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

impl From<Cli> for session::SessionArgs {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            command: cli.command.join(" "),
            password: cli.password,
            timeout: cli.timeout,
            connect_timeout: cli.connect_timeout,
            password_timeout: cli.password_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_only() {
        let cli = Cli::try_parse_from(["rcon", "localhost:27015"]).expect("host should parse");
        assert_eq!(cli.host, "localhost:27015");
        assert!(cli.command.is_empty());
        assert_eq!(cli.timeout, Duration::from_millis(5000));
        assert_eq!(cli.password_timeout, Duration::from_millis(5000));
        assert!(cli.connect_timeout.is_none());
    }

    #[test]
    fn joins_command_words() {
        let cli = Cli::try_parse_from(["rcon", "--timeout", "2s", "srv", "say", "hello", "world"])
            .expect("command should parse");
        assert_eq!(cli.timeout, Duration::from_secs(2));
        let args = session::SessionArgs::from(cli);
        assert_eq!(args.command, "say hello world");
        assert_eq!(args.host, "srv");
    }

    #[test]
    fn command_may_contain_hyphens() {
        let cli = Cli::try_parse_from(["rcon", "srv", "kick", "-r", "afk"])
            .expect("hyphenated command should parse");
        assert_eq!(cli.command, vec!["kick", "-r", "afk"]);
    }

    #[test]
    fn missing_host_is_usage_error() {
        let err = Cli::try_parse_from(["rcon"]).expect_err("host is required");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
        assert!(err.use_stderr());
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = Cli::try_parse_from(["rcon", "--timeout", "soon", "srv"])
            .expect_err("bad duration should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn parses_output_and_log_options() {
        let cli = Cli::try_parse_from([
            "rcon",
            "--format",
            "json",
            "--log-format",
            "json",
            "--log-level",
            "debug",
            "--connect-timeout",
            "250ms",
            "srv:1",
            "status",
        ])
        .expect("options should parse");
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(matches!(cli.log_format, LogFormat::Json));
        assert!(matches!(cli.log_level, LogLevel::Debug));
        assert_eq!(cli.connect_timeout, Some(Duration::from_millis(250)));
    }
}
