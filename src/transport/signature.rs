use std::collections::BTreeMap;

use md5::{Digest, Md5};
use url::form_urlencoded;

/// Form field carrying the request signature.
pub const SIGNATURE_FIELD: &str = "sig";

/// Free-text fields whose values are URL-encoded before hashing.
const URL_ENCODED_FIELDS: &[&str] = &["title", "trans_ref", "user_ref", "browser_ua", "referrer_url"];

/// Compute the request signature.
///
/// Keys are concatenated in ascending byte order as `key=value` without
/// separators, the API key is appended, and the MD5 digest of the result is
/// returned as lowercase hex. The `sig` field itself never takes part.
pub fn sign(api_key: &str, params: &BTreeMap<String, String>) -> String {
    let mut canonical = String::new();
    for (key, value) in params {
        if key == SIGNATURE_FIELD {
            continue;
        }
        canonical.push_str(key);
        canonical.push('=');
        if URL_ENCODED_FIELDS.contains(&key.as_str()) {
            canonical.push_str(&url_encode(value));
        } else {
            canonical.push_str(value);
        }
    }
    canonical.push_str(api_key);

    hex::encode(Md5::digest(canonical.as_bytes()))
}

/// `application/x-www-form-urlencoded` escaping that also escapes `*`, so only
/// ASCII alphanumerics and `-_.` pass through unchanged.
fn url_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}
