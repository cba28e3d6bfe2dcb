use std::io::Write;

use clap::ValueEnum;
use rconprims::client::CommandResponse;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Reply text as the server sent it, newline-terminated.
    Raw,
    /// One JSON object per invocation.
    Json,
}

#[derive(Serialize)]
struct ReplyOutput<'a> {
    host: &'a str,
    port: u16,
    id: u32,
    body: &'a str,
}

#[derive(Serialize)]
struct AuthOutput<'a> {
    host: &'a str,
    port: u16,
    authenticated: bool,
}

pub fn print_reply<W: Write>(
    out: &mut W,
    host: &str,
    port: u16,
    reply: &CommandResponse,
    format: OutputFormat,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Raw => reply.write_to(out),
        OutputFormat::Json => {
            let text = reply.text();
            let record = ReplyOutput {
                host,
                port,
                id: reply.id(),
                body: &text,
            };
            write_json_line(out, &record)
        }
    }
}

pub fn print_authenticated<W: Write>(
    out: &mut W,
    host: &str,
    port: u16,
    format: OutputFormat,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Raw => {
            writeln!(out, "Success!")?;
            out.flush()
        }
        OutputFormat::Json => write_json_line(
            out,
            &AuthOutput {
                host,
                port,
                authenticated: true,
            },
        ),
    }
}

fn write_json_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> std::io::Result<()> {
    let line = serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string());
    writeln!(out, "{line}")?;
    out.flush()
}
