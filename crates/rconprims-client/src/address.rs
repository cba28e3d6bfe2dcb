//! `host[:port]` parsing.

/// Port used when the host string does not name one.
pub const DEFAULT_PORT: u16 = 25575;

/// Host used when the host string leaves it empty.
pub const DEFAULT_HOST: &str = "localhost";

/// Split `host[:port]` using [`DEFAULT_PORT`].
pub fn split_host(host_str: &str) -> (String, u16) {
    split_host_with_default(host_str, DEFAULT_PORT)
}

/// Split `host[:port]` at the last colon.
///
/// A missing, empty or unparsable port yields `default_port`; an empty host
/// yields [`DEFAULT_HOST`].
pub fn split_host_with_default(host_str: &str, default_port: u16) -> (String, u16) {
    let (host, port) = match host_str.rsplit_once(':') {
        Some((host, port)) => (host, port.trim().parse().unwrap_or(default_port)),
        None => (host_str, default_port),
    };

    let host = if host.is_empty() { DEFAULT_HOST } else { host };
    (host.to_string(), port)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(input: &str, host: &str, port: u16) {
        assert_eq!(
            split_host(input),
            (host.to_string(), port),
            "input {input:?}"
        );
    }

    #[test]
    fn splits_host_strings() {
        check("name", "name", DEFAULT_PORT);
        check("name:27000", "name", 27000);
        check(":", "localhost", DEFAULT_PORT);
        check(":27000", "localhost", 27000);
        check("name:", "name", DEFAULT_PORT);
        check("", "localhost", DEFAULT_PORT);
    }

    #[test]
    fn unparsable_port_falls_back() {
        check("name:abc", "name", DEFAULT_PORT);
        check("name:70000", "name", DEFAULT_PORT);
        check("name:-1", "name", DEFAULT_PORT);
    }

    #[test]
    fn splits_at_last_colon() {
        check("a:b:27015", "a:b", 27015);
    }

    #[test]
    fn custom_default_port() {
        assert_eq!(
            split_host_with_default("srcds", 27015),
            ("srcds".to_string(), 27015)
        );
        assert_eq!(
            split_host_with_default("srcds:1", 27015),
            ("srcds".to_string(), 1)
        );
    }
}
