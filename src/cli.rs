/// CLI argument parsing
///
/// collectd's exec plugin passes the host name and interval through the
/// environment; everything else comes from the command line.

use std::ffi::OsString;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;

use crate::core::config::{parse_interval, Config, ConfigError, Credentials};
use crate::utils::{DEFAULT_REQUEST_TIMEOUT_SECS, ENV_COLLECTD_HOSTNAME, ENV_COLLECTD_INTERVAL};

// Build timestamp injected at compile time
pub const VERSION_WITH_BUILD: &str = concat!(env!("CARGO_PKG_VERSION"), " (built: ", env!("BUILD_TIMESTAMP"), ")");

pub const USAGE: &str = "Usage:\nCOLLECTD_HOSTNAME=localhost COLLECTD_INTERVAL=60 comet-collectd COMETSERVER_URL USER PASS NAMESPACE";

#[derive(Parser, Debug)]
#[command(name = "comet-collectd")]
#[command(author, version = VERSION_WITH_BUILD, about, long_about = None)]
pub struct Cli {
    /// Host name reported to collectd
    #[arg(long, env = ENV_COLLECTD_HOSTNAME)]
    pub hostname: String,

    /// Poll interval in seconds (fractions are truncated)
    #[arg(long, env = ENV_COLLECTD_INTERVAL, value_parser = parse_interval)]
    pub interval: u64,

    /// Per-request HTTP timeout in seconds, 0 to disable
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Comet Server base URL
    #[arg(value_name = "COMETSERVER_URL")]
    pub url: String,

    /// Admin username
    #[arg(value_name = "USER")]
    pub user: String,

    /// Admin password
    #[arg(value_name = "PASS")]
    pub pass: String,

    /// Plugin namespace used in metric identifiers
    #[arg(value_name = "NAMESPACE")]
    pub namespace: String,
}

#[derive(Debug)]
pub enum CliError {
    /// `--help` or `--version`: let clap print and exit normally
    Info(clap::Error),
    /// Anything else: print the usage text and exit 1
    Usage(String),
}

impl Cli {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        if self.hostname.trim().is_empty() {
            return Err(ConfigError::Empty("COLLECTD_HOSTNAME"));
        }
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::Empty("NAMESPACE"));
        }

        Ok(Config {
            hostname: self.hostname,
            namespace: self.namespace,
            interval: Duration::from_secs(self.interval),
            request_timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
            credentials: Credentials::new(self.url, self.user, self.pass)?,
            once: self.once,
        })
    }
}

/// Parse arguments (and the collectd environment) into a `Config`
pub fn load_config<I, T>(args: I) -> Result<Config, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => CliError::Info(e),
        _ => CliError::Usage(e.render().to_string()),
    })?;

    cli.into_config().map_err(|e| CliError::Usage(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Vec<String> {
        let mut v = vec![
            "comet-collectd".to_string(),
            "--hostname".to_string(),
            "backup01".to_string(),
            "--interval".to_string(),
            "60.0".to_string(),
        ];
        v.extend(extra.iter().map(|s| s.to_string()));
        v
    }

    #[test]
    fn test_load_config() {
        let config = load_config(args(&["https://comet.example.com/", "admin", "pw", "comet"])).unwrap();

        assert_eq!(config.hostname, "backup01");
        assert_eq!(config.namespace, "comet");
        assert_eq!(config.interval_secs(), 60);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.credentials.base_url(), "https://comet.example.com/");
        assert_eq!(config.credentials.username(), "admin");
        assert_eq!(config.credentials.password(), "pw");
        assert!(!config.once);
    }

    #[test]
    fn test_load_config_optional_flags() {
        let config = load_config(args(&["--timeout", "0", "--once", "http://x/", "a", "b", "ns"])).unwrap();
        assert_eq!(config.request_timeout, None);
        assert!(config.once);
    }

    #[test]
    fn test_load_config_from_collectd_environment() {
        // Both halves share one test: the variables are process-global
        std::env::set_var(ENV_COLLECTD_HOSTNAME, "collectd-host");
        std::env::set_var(ENV_COLLECTD_INTERVAL, "10.9");

        let config = load_config(["comet-collectd", "http://x/", "admin", "pw", "comet"]).unwrap();
        assert_eq!(config.hostname, "collectd-host");
        assert_eq!(config.interval_secs(), 10);

        std::env::remove_var(ENV_COLLECTD_HOSTNAME);
        let result = load_config(["comet-collectd", "http://x/", "admin", "pw", "comet"]);
        assert!(matches!(result, Err(CliError::Usage(_))));

        std::env::remove_var(ENV_COLLECTD_INTERVAL);
    }

    #[test]
    fn test_missing_positional_is_usage_error() {
        let result = load_config(args(&["https://comet.example.com/", "admin", "pw"]));
        assert!(matches!(result, Err(CliError::Usage(_))));
    }

    #[test]
    fn test_invalid_interval_is_usage_error() {
        let result = load_config(vec![
            "comet-collectd", "--hostname", "h", "--interval", "soon", "http://x/", "a", "b", "ns",
        ]);
        assert!(matches!(result, Err(CliError::Usage(_))));
    }

    #[test]
    fn test_empty_namespace_is_usage_error() {
        let result = load_config(args(&["http://x/", "a", "b", " "]));
        match result {
            Err(CliError::Usage(reason)) => assert!(reason.contains("NAMESPACE")),
            other => panic!("expected usage error, got {:?}", other),
        }
    }

    #[test]
    fn test_help_is_not_a_usage_error() {
        let result = load_config(vec!["comet-collectd", "--help"]);
        assert!(matches!(result, Err(CliError::Info(_))));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
