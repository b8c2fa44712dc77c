/// Runtime configuration for the collectd plugin
///
/// Built once at startup from the collectd environment and the command line,
/// then handed by reference to the sampler and output sink.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("invalid interval '{0}': expected a number of seconds >= 1")]
    InvalidInterval(String),
}

/// Admin credentials for the Comet Server, fixed for the process lifetime
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let username = username.into();
        let password = password.into();

        if base_url.trim().is_empty() {
            return Err(ConfigError::Empty("COMETSERVER_URL"));
        }
        if username.is_empty() {
            return Err(ConfigError::Empty("USER"));
        }
        if password.is_empty() {
            return Err(ConfigError::Empty("PASS"));
        }

        Ok(Self {
            base_url: base_url.trim().to_string(),
            username,
            password,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Host identifier used in PUTVAL lines
    pub hostname: String,
    /// Plugin identifier used in PUTVAL lines
    pub namespace: String,
    pub interval: Duration,
    /// Per-request HTTP timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    pub credentials: Credentials,
    /// Stop after a single poll cycle
    pub once: bool,
}

impl Config {
    pub fn interval_secs(&self) -> u64 {
        self.interval.as_secs()
    }
}

/// Parse the collectd interval: a float, truncated to whole seconds
pub fn parse_interval(raw: &str) -> Result<u64, ConfigError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidInterval(raw.to_string()))?;

    if !value.is_finite() || value.trunc() < 1.0 {
        return Err(ConfigError::InvalidInterval(raw.to_string()));
    }

    Ok(value.trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval_truncates_float() {
        assert_eq!(parse_interval("60"), Ok(60));
        assert_eq!(parse_interval("60.000"), Ok(60));
        assert_eq!(parse_interval("10.9"), Ok(10));
        assert_eq!(parse_interval(" 5 "), Ok(5));
    }

    #[test]
    fn test_parse_interval_rejects_invalid() {
        for raw in ["", "abc", "0", "0.5", "-10", "NaN", "inf"] {
            assert!(parse_interval(raw).is_err(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_credentials_reject_empty_fields() {
        assert_eq!(
            Credentials::new("", "admin", "pw").unwrap_err(),
            ConfigError::Empty("COMETSERVER_URL")
        );
        assert_eq!(
            Credentials::new("http://x/", "", "pw").unwrap_err(),
            ConfigError::Empty("USER")
        );
        assert_eq!(
            Credentials::new("http://x/", "admin", "").unwrap_err(),
            ConfigError::Empty("PASS")
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("http://x/", "admin", "s3cret").unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("s3cret"));
    }
}
