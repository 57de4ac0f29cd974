//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! Everything here is a pure function of its inputs; the caller supplies the
//! timestamp and nonce so signatures are reproducible.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha1::Sha1;

use crate::config::Credentials;

/// RFC 3986 unreserved characters stay literal, everything else is escaped.
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, RFC3986).to_string()
}

/// Fresh single-use nonce: 32 lowercase hex characters.
pub fn nonce() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Values that change on every request.
#[derive(Debug, Clone, Copy)]
pub struct SigningContext<'a> {
    pub method: &'a str,
    pub base_url: &'a str,
    pub timestamp: i64,
    pub nonce: &'a str,
}

/// Sign `params` and return the `Authorization` header value.
pub fn authorization_header(
    credentials: &Credentials,
    ctx: SigningContext<'_>,
    params: &[(&str, &str)],
) -> String {
    let timestamp = ctx.timestamp.to_string();
    let mut oauth_params = vec![
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", ctx.nonce),
        ("oauth_signature_method", SIGNATURE_METHOD),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", credentials.access_token.as_str()),
        ("oauth_version", OAUTH_VERSION),
    ];

    let signature = signature(credentials, ctx, &oauth_params, params);
    oauth_params.push(("oauth_signature", signature.as_str()));
    oauth_params.sort_unstable_by_key(|(key, _)| *key);

    let fields = oauth_params
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {fields}")
}

fn signature(
    credentials: &Credentials,
    ctx: SigningContext<'_>,
    oauth_params: &[(&str, &str)],
    params: &[(&str, &str)],
) -> String {
    let all: Vec<(&str, &str)> = oauth_params.iter().chain(params).copied().collect();
    let base = signature_base_string(ctx.method, ctx.base_url, &all);
    let key = format!(
        "{}&{}",
        encode(&credentials.consumer_secret),
        encode(&credentials.access_token_secret)
    );

    let mut mac = <Hmac<Sha1> as Mac>::new_from_slice(key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(base.as_bytes());

    STANDARD.encode(mac.finalize().into_bytes())
}

/// `METHOD&enc(url)&enc(sorted, encoded parameters)`.
pub fn signature_base_string(method: &str, base_url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(key, value)| (encode(key), encode(value)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(base_url),
        encode(&parameter_string)
    )
}
