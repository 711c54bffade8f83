// Configuration module entry point
// Builds the startup configuration from built-in defaults and the CLI port

mod types;

use std::net::SocketAddr;
use std::path::PathBuf;

pub use config::ConfigError;
pub use types::{Config, LoggingConfig, ServerConfig};

/// Port used when none is given on the command line
pub const DEFAULT_PORT: u16 = 8000;

impl Config {
    /// Build configuration from command line arguments (program name excluded).
    ///
    /// The first argument, if present, is the TCP port. Anything after it is ignored.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let port = args.into_iter().next().map(|arg| parse_port(&arg)).transpose()?;
        Self::load(port, default_root())
    }

    /// Build configuration with an optional port override and a root directory
    pub fn load(port: Option<u16>, root: PathBuf) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("logging.access_log", true)?
            .set_override_option("server.port", port.map(i64::from))?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        cfg.server.root = root;
        Ok(cfg)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Parse the positional port argument
pub fn parse_port(arg: &str) -> Result<u16, ConfigError> {
    arg.trim().parse::<u16>().map_err(|e| {
        ConfigError::Message(format!(
            "Invalid port '{arg}': {e} (expected an integer between 0 and 65535)"
        ))
    })
}

/// Directory containing the running executable, falling back to the working directory
fn default_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        let cfg = Config::from_args(Vec::new()).unwrap();
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert!(cfg.logging.access_log);
    }

    #[test]
    fn test_port_argument() {
        let cfg = Config::from_args(vec!["9123".to_string()]).unwrap();
        assert_eq!(cfg.server.port, 9123);
    }

    #[test]
    fn test_extra_arguments_ignored() {
        let cfg = Config::from_args(vec!["8081".to_string(), "extra".to_string()]).unwrap();
        assert_eq!(cfg.server.port, 8081);
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_args(vec!["abc".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Invalid port 'abc'"));

        assert!(parse_port("70000").is_err());
        assert!(parse_port("-1").is_err());
        assert!(parse_port("").is_err());
    }

    #[test]
    fn test_root_is_kept() {
        let cfg = Config::load(None, PathBuf::from("/srv/www")).unwrap();
        assert_eq!(cfg.server.root, PathBuf::from("/srv/www"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_root_is_kept() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = PathBuf::from(OsStr::from_bytes(b"/tmp/pr\xffaat"));
        let cfg = Config::load(None, root.clone()).unwrap();
        assert_eq!(cfg.server.root, root);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load(Some(8080), PathBuf::from(".")).unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(addr.ip().is_unspecified());
    }
}
