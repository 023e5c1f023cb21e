//! Probe execution.
//!
//! # Responsibilities
//! - Validate verb and target before any I/O
//! - Inject credentials
//! - Run the exchange on its own task and race it against the deadline
//! - Abort the in-flight request when the deadline wins

use std::time::Instant;

use reqwest::header::AUTHORIZATION;
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::assertion::AssertionInput;
use crate::config::ProbeSettings;
use crate::observability::metrics;
use crate::probe::deadline::Deadline;
use crate::probe::result::{ProbeError, ProbeResult};
use crate::probe::verb::parse_verb;

/// A single request to issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeRequest {
    pub target: String,
    pub verb: String,
    pub username: String,
    pub password: String,
}

impl ProbeRequest {
    pub fn new(target: impl Into<String>, verb: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            verb: verb.into(),
            ..Default::default()
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }
}

/// Executes probes with a fixed set of client settings.
///
/// Each probe builds its own client; nothing is shared between probes.
#[derive(Debug, Clone, Default)]
pub struct Prober {
    settings: ProbeSettings,
}

impl Prober {
    pub fn new(settings: ProbeSettings) -> Self {
        Self { settings }
    }

    /// Run one probe. Never fails; every error becomes a failed [`ProbeResult`].
    pub async fn run(
        &self,
        request: &ProbeRequest,
        input: &AssertionInput,
        deadline: impl Into<Deadline>,
    ) -> ProbeResult {
        let probe_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "probe",
            %probe_id,
            target = %request.target,
            verb = %request.verb
        );
        let start = Instant::now();

        let outcome = self
            .execute(request, input.clone(), deadline.into())
            .instrument(span.clone())
            .await;

        span.in_scope(|| match &outcome {
            Ok(()) => {
                tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "Probe passed");
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "Probe failed");
            }
        });

        let label = match &outcome {
            Ok(()) => "pass",
            Err(e) => e.kind(),
        };
        metrics::record_probe(label, start);

        outcome.into()
    }

    async fn execute(
        &self,
        request: &ProbeRequest,
        input: AssertionInput,
        deadline: Deadline,
    ) -> Result<(), ProbeError> {
        let method =
            parse_verb(&request.verb).ok_or_else(|| ProbeError::InvalidVerb(request.verb.clone()))?;
        let url = Url::parse(&request.target)
            .map_err(|e| ProbeError::InvalidTarget(format!("{}: {}", request.target, e)))?;

        let client = self.build_client()?;
        let builder = authorize(
            client.request(method, url),
            &request.username,
            &request.password,
        );

        // Cancelled on every exit path, including the caller dropping this future.
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let _abort_on_exit = cancel.drop_guard();

        // Yields `None` once aborted; by then nobody is waiting on the handle.
        let mut task = tokio::spawn(
            async move {
                tokio::select! {
                    _ = task_cancel.cancelled() => None,
                    outcome = exchange(builder, input) => Some(outcome),
                }
            }
            .in_current_span(),
        );

        tokio::select! {
            biased;
            reason = deadline.expired() => Err(ProbeError::Timeout(reason)),
            joined = &mut task => match joined {
                Ok(Some(outcome)) => outcome,
                Ok(None) => Err(ProbeError::Task("request aborted".to_string())),
                Err(e) => Err(ProbeError::Task(e.to_string())),
            },
        }
    }

    fn build_client(&self) -> Result<Client, ProbeError> {
        let mut builder = Client::builder()
            .user_agent(self.settings.user_agent.as_str())
            .pool_max_idle_per_host(0)
            .redirect(Policy::limited(self.settings.max_redirects));

        if !self.settings.system_proxy {
            builder = builder.no_proxy();
        }

        builder.build().map_err(ProbeError::Request)
    }
}

/// Send the request, then parse and evaluate the assertions against the response.
async fn exchange(builder: RequestBuilder, input: AssertionInput) -> Result<(), ProbeError> {
    let response = builder.send().await.map_err(ProbeError::Request)?;
    tracing::debug!(status = %response.status(), "Response received");

    let assertions = input.parse()?;
    assertions.compare(response).await?;
    Ok(())
}

/// Basic auth when both parts are present, a raw `Authorization` token when
/// only the password is, nothing otherwise.
fn authorize(builder: RequestBuilder, username: &str, password: &str) -> RequestBuilder {
    if password.is_empty() {
        return builder;
    }
    if username.is_empty() {
        builder.header(AUTHORIZATION, password)
    } else {
        builder.basic_auth(username, Some(password))
    }
}

/// Run a single probe with default client settings.
pub async fn run(
    target: &str,
    verb: &str,
    input: impl Into<AssertionInput>,
    username: &str,
    password: &str,
    deadline: impl Into<Deadline>,
) -> ProbeResult {
    let request = ProbeRequest::new(target, verb).with_credentials(username, password);
    Prober::default().run(&request, &input.into(), deadline).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn auth_header(username: &str, password: &str) -> Option<String> {
        let client = Client::new();
        let request = authorize(client.get("http://probe.test/"), username, password)
            .build()
            .unwrap();
        request
            .headers()
            .get(AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn test_basic_auth_when_both_present() {
        assert_eq!(auth_header("u", "p"), Some("Basic dTpw".to_string()));
    }

    #[test]
    fn test_raw_token_when_password_only() {
        assert_eq!(auth_header("", "tok123"), Some("tok123".to_string()));
    }

    #[test]
    fn test_no_header_without_password() {
        assert_eq!(auth_header("", ""), None);
        assert_eq!(auth_header("u", ""), None);
    }

    #[tokio::test]
    async fn test_invalid_verb_short_circuits() {
        let result = run("http://127.0.0.1:9/", "FETCH", "", "", "", Duration::from_secs(1)).await;
        assert_eq!(
            result.into_parts(),
            (false, "provided invalid command/http verb: FETCH".to_string())
        );
    }

    #[tokio::test]
    async fn test_invalid_target_short_circuits() {
        let result = run("not a url", "GET", "", "", "", Duration::from_secs(1)).await;
        assert!(!result.success);
        assert!(result
            .message
            .starts_with("encounted error while creating request: not a url"));
    }

    #[test]
    fn test_request_builder_sets_method() {
        let request = ProbeRequest::new("http://probe.test/", "delete").with_credentials("", "t");
        assert_eq!(request.verb, "delete");
        assert_eq!(parse_verb(&request.verb), Some(reqwest::Method::DELETE));
    }
}
