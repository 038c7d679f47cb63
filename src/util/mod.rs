//! Utility functions shared across the application.

use axum::http::HeaderMap;

/// Extract a cookie value from the `Cookie` header.
///
/// Handles multiple `Cookie` headers and the usual `name=value; ...`
/// packing. Returns the first match.
pub fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
        .next()
}

/// Extract a bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{AUTHORIZATION, COOKIE};

    #[test]
    fn test_find_cookie_single() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "session_token=abc123".parse().unwrap());
        assert_eq!(
            find_cookie(&headers, "session_token"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_find_cookie_among_many() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            "theme=dark; session_token=abc123; lang=fr".parse().unwrap(),
        );
        assert_eq!(
            find_cookie(&headers, "session_token"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_find_cookie_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "theme=dark".parse().unwrap());
        assert_eq!(find_cookie(&headers, "session_token"), None);
    }

    #[test]
    fn test_find_cookie_no_partial_name_match() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "old_session_token=abc".parse().unwrap());
        assert_eq!(find_cookie(&headers, "session_token"), None);
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer tok-99".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("tok-99".to_string()));
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcg==".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_bearer_token_empty() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
