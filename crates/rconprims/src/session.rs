use std::time::Duration;

use rconprims::client::{Connection, ConnectionConfig};
use tracing::debug;

use crate::exit::{io_error, rcon_error, CliError, CliResult, FAILURE, SUCCESS};
use crate::output::{print_authenticated, print_reply, OutputFormat};
use crate::password::read_password;

/// Everything one invocation needs, after argument parsing.
#[derive(Debug)]
pub struct SessionArgs {
    pub host: String,
    /// Empty when only authentication should be checked.
    pub command: String,
    pub password: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Option<Duration>,
    pub password_timeout: Duration,
}

pub fn run(args: SessionArgs, format: OutputFormat) -> CliResult<i32> {
    let password = match args.password {
        Some(password) => password,
        None => read_password(args.password_timeout),
    };
    if password.is_empty() {
        return Err(CliError::new(FAILURE, "no password provided"));
    }

    let config = ConnectionConfig {
        timeout: args.timeout,
        connect_timeout: args.connect_timeout,
        ..ConnectionConfig::default()
    };
    let mut rcon = Connection::with_config(&args.host, config);

    rcon.authenticate_default(&password)
        .map_err(|err| rcon_error("authentication failed", err))?;

    let mut stdout = std::io::stdout().lock();

    if args.command.is_empty() {
        print_authenticated(&mut stdout, rcon.hostname(), rcon.port(), format)
            .map_err(|err| io_error("writing output failed", err))?;
        return Ok(SUCCESS);
    }

    debug!(command = %args.command, "running command");
    let reply = rcon
        .run_command_default(&args.command)
        .map_err(|err| rcon_error("command failed", err))?;

    print_reply(&mut stdout, rcon.hostname(), rcon.port(), &reply, format)
        .map_err(|err| io_error("writing output failed", err))?;

    Ok(SUCCESS)
}
