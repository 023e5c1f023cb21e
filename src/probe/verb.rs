//! HTTP verb normalization.

use reqwest::Method;

/// Methods a probe may issue.
pub const SUPPORTED_VERBS: [&str; 9] = [
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "CONNECT", "TRACE",
];

/// Map a case-insensitive verb onto one of the supported methods.
///
/// Extension methods are rejected even though HTTP allows them.
pub fn parse_verb(verb: &str) -> Option<Method> {
    let method = match verb.to_ascii_uppercase().as_str() {
        "GET" => Method::GET,
        "POST" => Method::POST,
        "PUT" => Method::PUT,
        "DELETE" => Method::DELETE,
        "PATCH" => Method::PATCH,
        "HEAD" => Method::HEAD,
        "OPTIONS" => Method::OPTIONS,
        "CONNECT" => Method::CONNECT,
        "TRACE" => Method::TRACE,
        _ => return None,
    };
    Some(method)
}
