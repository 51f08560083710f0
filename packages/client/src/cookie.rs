//! Cookie string lookup.

/// Name of the cookie carrying the session identity.
pub const IDENTITY_COOKIE: &str = "identifier";

/// Look up a cookie value in a `document.cookie`-style string.
///
/// The whole string is URL-decoded first, then split on `;`. Leading spaces
/// of every pair are ignored and the first pair whose key matches `name`
/// exactly wins. Returns an empty string when the cookie is absent.
pub fn get_cookie(cookies: &str, name: &str) -> String {
    let decoded = urlencoding::decode(cookies)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| cookies.to_string());

    decoded
        .split(';')
        .map(|pair| pair.trim_start_matches(' '))
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
        .unwrap_or_default()
}
