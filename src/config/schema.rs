//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::assertion::{AssertionInput, FlagSpec, OptionValue};
use crate::probe::ProbeRequest;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProbeConfig {
    /// Client and deadline settings shared by every check.
    pub probe: ProbeSettings,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Named checks.
    pub checks: Vec<CheckConfig>,
}

impl ProbeConfig {
    /// Look up a check by name.
    pub fn check(&self, name: &str) -> Option<&CheckConfig> {
        self.checks.iter().find(|c| c.name == name)
    }
}

/// HTTP client and deadline settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Default probe deadline in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with each probe.
    pub user_agent: String,

    /// Maximum redirects followed before giving up.
    pub max_redirects: usize,

    /// Honor HTTP(S)_PROXY environment variables.
    pub system_proxy: bool,
}

impl ProbeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            user_agent: concat!("http-probe/", env!("CARGO_PKG_VERSION")).to_string(),
            max_redirects: 10,
            system_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// A single named check.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckConfig {
    /// Check identifier.
    pub name: String,

    /// URL to probe.
    pub target: String,

    /// HTTP verb (default: GET).
    #[serde(default = "default_verb")]
    pub verb: String,

    /// Assertions in the inline grammar.
    #[serde(default)]
    pub expected: Option<String>,

    /// Assertion flags in the flag+value grammar.
    #[serde(default)]
    pub options: Option<BTreeMap<String, OptionValue>>,

    /// Shared expected value for `options`.
    #[serde(default)]
    pub expected_value: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Overrides `probe.timeout_secs` for this check.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_verb() -> String {
    "GET".to_string()
}

impl CheckConfig {
    /// Assertion input in whichever grammar this check uses.
    pub fn assertion_input(&self) -> AssertionInput {
        match &self.options {
            Some(options) => AssertionInput::Flags(FlagSpec {
                options: options.clone(),
                expected: self.expected_value.clone(),
            }),
            None => AssertionInput::Inline(self.expected.clone().unwrap_or_default()),
        }
    }

    pub fn request(&self) -> ProbeRequest {
        ProbeRequest::new(&self.target, &self.verb)
            .with_credentials(&self.username, &self.password)
    }

    /// Effective deadline given the shared settings.
    pub fn timeout(&self, settings: &ProbeSettings) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| settings.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProbeConfig::default();
        assert_eq!(config.probe.timeout_secs, 5);
        assert_eq!(config.probe.max_redirects, 10);
        assert!(config.probe.user_agent.starts_with("http-probe/"));
        assert_eq!(config.observability.log_level, "info");
        assert!(config.checks.is_empty());
    }

    #[test]
    fn test_check_inputs() {
        let config: ProbeConfig = toml::from_str(
            r#"
            [probe]
            timeout_secs = 3

            [[checks]]
            name = "inline"
            target = "http://svc.test/health"
            expected = "status_code=200"

            [[checks]]
            name = "flags"
            target = "http://svc.test/"
            verb = "head"
            expected_value = "ok"
            timeout_secs = 9
            options = { status_code = 204, match = true }
            "#,
        )
        .unwrap();

        let inline = config.check("inline").unwrap();
        assert_eq!(inline.verb, "GET");
        assert_eq!(inline.assertion_input(), AssertionInput::Inline("status_code=200".into()));
        assert_eq!(inline.timeout(&config.probe), Duration::from_secs(3));

        let flags = config.check("flags").unwrap();
        let set = flags.assertion_input().parse().unwrap();
        assert_eq!(set.expected_status, Some(204));
        assert_eq!(set.exact.as_deref(), Some("ok"));
        assert_eq!(flags.timeout(&config.probe), Duration::from_secs(9));
        assert_eq!(flags.request().verb, "head");

        assert!(config.check("missing").is_none());
    }
}
