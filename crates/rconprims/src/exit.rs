use std::fmt;
use std::io;

use rconprims::client::RconError;

// The process contract is binary: 0 on success, 1 on any failure.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    CliError::new(FAILURE, format!("{context}: {err}"))
}

pub fn rcon_error(context: &str, err: RconError) -> CliError {
    let message = if err.is_auth_rejected() {
        format!("{context}: wrong password")
    } else {
        format!("{context}: {err}")
    };
    CliError::new(FAILURE, message)
}
