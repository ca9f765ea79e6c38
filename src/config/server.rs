/// HTTP server configuration.
///
/// Defaults can be overridden with the `TICTAC_HOST` and `TICTAC_PORT` environment variables.
use log::warn;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

pub const HOST_ENV: &str = "TICTAC_HOST";
pub const PORT_ENV: &str = "TICTAC_PORT";

/// Resolve the bind address from the environment, falling back to the defaults.
pub fn bind_address() -> (String, u16) {
    let host = std::env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = match std::env::var(PORT_ENV) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("[Config] Ignoring invalid {}={:?}, using {}", PORT_ENV, raw, DEFAULT_PORT);
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    };
    (host, port)
}
