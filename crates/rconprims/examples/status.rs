//! Authenticate against a server and print the reply to `status`.
//!
//! ```text
//! RCON_PASSWORD=secret cargo run --example status -- 127.0.0.1:27015
//! ```

use std::time::Duration;

use rconprims::client::{Connection, ConnectionConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "localhost".to_string());
    let password = std::env::var("RCON_PASSWORD")?;

    let config = ConnectionConfig {
        timeout: Duration::from_secs(3),
        connect_timeout: Some(Duration::from_secs(3)),
        ..ConnectionConfig::default()
    };
    let mut rcon = Connection::with_config(&host, config);
    println!("connecting to {}:{}", rcon.hostname(), rcon.port());

    rcon.authenticate_default(&password)?;
    let reply = rcon.run_command_default("status")?;
    reply.write_to(&mut std::io::stdout())?;

    rcon.disconnect();
    Ok(())
}
