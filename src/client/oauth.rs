//! OAuth 1.0 HMAC-SHA1 request signing (RFC 5849 §3.4).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// Keys used to sign one request. `token` is absent for consumer-only calls
/// such as `profile.get_auth`.
#[derive(Debug, Clone, Copy)]
pub struct OAuthCredentials<'a> {
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
    pub token: Option<&'a str>,
    pub token_secret: &'a str,
}

/// RFC 3986 percent-encoding: everything except `A-Z a-z 0-9 - . _ ~`.
pub fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Builds `METHOD&enc(url)&enc(normalized params)`.
pub fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();
    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&normalized)
    )
}

/// Signs a base string with `enc(consumer_secret)&enc(token_secret)`.
pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(base_string.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Appends the `oauth_*` protocol parameters and the signature to `params`.
pub(crate) fn signed_params(
    method: &str,
    url: &str,
    mut params: Vec<(String, String)>,
    credentials: &OAuthCredentials<'_>,
    nonce: &str,
    timestamp: i64,
) -> Vec<(String, String)> {
    params.push(("oauth_consumer_key".into(), credentials.consumer_key.into()));
    params.push(("oauth_nonce".into(), nonce.into()));
    params.push(("oauth_signature_method".into(), SIGNATURE_METHOD.into()));
    params.push(("oauth_timestamp".into(), timestamp.to_string()));
    params.push(("oauth_version".into(), OAUTH_VERSION.into()));
    if let Some(token) = credentials.token {
        params.push(("oauth_token".into(), token.into()));
    }

    let base = signature_base_string(method, url, &params);
    let signature = sign(&base, credentials.consumer_secret, credentials.token_secret);
    params.push(("oauth_signature".into(), signature));
    params
}
