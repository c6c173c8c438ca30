//! Session Token Storage
//!
//! Reads and writes the `jwt` cookie holding the API session token.

use wasm_bindgen::JsCast;

/// Name of the cookie holding the session token
const SESSION_COOKIE: &str = "jwt";

/// Cookie lifetime in days
const SESSION_DAYS: i64 = 7;

/// Read the session token from the cookie, if present
pub fn token() -> Option<String> {
    let document = html_document()?;
    let cookies = document.cookie().ok()?;
    find_cookie(&cookies, SESSION_COOKIE)
}

/// Store the session token in the cookie with a 7-day expiry
pub fn store_token(token: &str) {
    if let Some(document) = html_document() {
        let expires = expiry_date(chrono::Utc::now());
        let _ = document.set_cookie(&cookie_string(SESSION_COOKIE, token, &expires));
    }
}

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}

/// Find a cookie value by name in a `document.cookie` string
fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Format a cookie assignment string scoped to the whole site
fn cookie_string(name: &str, value: &str, expires: &str) -> String {
    format!("{}={}; expires={}; path=/", name, value, expires)
}

/// Expiry date `SESSION_DAYS` from now, in the HTTP cookie date format
fn expiry_date(now: chrono::DateTime<chrono::Utc>) -> String {
    (now + chrono::Duration::days(SESSION_DAYS))
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_cookie() {
        let cookies = "theme=dark; jwt=abc123; lang=en";
        assert_eq!(find_cookie(cookies, "jwt"), Some("abc123".to_string()));
    }

    #[test]
    fn test_find_cookie_missing() {
        assert_eq!(find_cookie("theme=dark", "jwt"), None);
        assert_eq!(find_cookie("", "jwt"), None);
    }

    #[test]
    fn test_find_cookie_requires_exact_name() {
        let cookies = "jwt_backup=old; other=jwt";
        assert_eq!(find_cookie(cookies, "jwt"), None);
    }

    #[test]
    fn test_find_cookie_keeps_equals_in_value() {
        assert_eq!(find_cookie("jwt=abc=def", "jwt"), Some("abc=def".to_string()));
    }

    #[test]
    fn test_cookie_string_format() {
        let cookie = cookie_string("jwt", "token123", "Tue, 01 Sep 2026 00:00:00 GMT");
        assert_eq!(cookie, "jwt=token123; expires=Tue, 01 Sep 2026 00:00:00 GMT; path=/");
    }

    #[test]
    fn test_expiry_date_is_seven_days_out() {
        use chrono::TimeZone;

        let now = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(expiry_date(now), "Fri, 08 Mar 2024 12:30:00 GMT");
    }
}
