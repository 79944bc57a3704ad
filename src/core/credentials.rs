/// The carrier portal displays keys as `key : secret`; the API wants `key:secret`.
const PORTAL_SEPARATOR: &str = " : ";

pub fn normalize(raw_api_key: &str) -> String {
    let mut key = raw_api_key.replace(PORTAL_SEPARATOR, ":");
    // "a  :  b" leaves a fresh " : " behind after one pass
    while key.contains(PORTAL_SEPARATOR) {
        key = key.replace(PORTAL_SEPARATOR, ":");
    }
    key
}

/// Splits a `key:secret` credential into Basic auth parts.
pub fn basic_auth_parts(api_key: &str) -> (&str, Option<&str>) {
    match api_key.split_once(':') {
        Some((user, secret)) => (user, Some(secret)),
        None => (api_key, None),
    }
}

/// Log-safe form of a credential.
pub fn mask(api_key: &str) -> String {
    let visible: String = api_key.chars().take(4).collect();
    if api_key.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
