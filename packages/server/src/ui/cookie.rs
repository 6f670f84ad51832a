//! Session cookie handling.

use std::time::Duration;

use axum::http::{HeaderMap, header};
use cookie::{Cookie, SameSite};

use crate::domain::SessionToken;

pub const SESSION_COOKIE_NAME: &str = "sellgadgetz.sid";

/// `Set-Cookie` value for a freshly started session
pub fn session_cookie(token: &SessionToken, ttl: Duration) -> String {
    let max_age = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    Cookie::build((SESSION_COOKIE_NAME, token.as_str().to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age))
        .build()
        .to_string()
}

/// `Set-Cookie` value that makes the browser drop the session cookie
pub fn removal_cookie() -> String {
    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    cookie.make_removal();
    cookie.to_string()
}

/// Session token carried by the request, if any
pub fn session_token(headers: &HeaderMap) -> Option<SessionToken> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .and_then(|cookie| SessionToken::new(cookie.value().to_string()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_cookie_attributes() {
        // テスト項目: セッション Cookie に HttpOnly / SameSite=Lax / Path / Max-Age が付く
        // given (前提条件):
        let token = SessionToken::new("abc123".to_string()).unwrap();

        // when (操作):
        let value = session_cookie(&token, Duration::from_secs(24 * 60 * 60));

        // then (期待する結果):
        assert!(value.starts_with("sellgadgetz.sid=abc123"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("Max-Age=86400"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        // テスト項目: 削除用 Cookie は値が空で Max-Age=0
        // when (操作):
        let value = removal_cookie();

        // then (期待する結果):
        assert!(value.starts_with("sellgadgetz.sid=;"));
        assert!(value.contains("Max-Age=0"));
    }

    #[test]
    fn test_session_token_is_found_among_other_cookies() {
        // テスト項目: 複数の Cookie ヘッダーからセッショントークンを取り出せる
        // given (前提条件):
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("lang=en; sellgadgetz.sid=tok-1"),
        );

        // when (操作):
        let token = session_token(&headers);

        // then (期待する結果):
        assert_eq!(token.map(|t| t.as_str().to_string()), Some("tok-1".to_string()));
        assert!(session_token(&HeaderMap::new()).is_none());
    }
}
