use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;

pub const SESSION_COOKIE: &str = "kf_session";

/// The visitor's session id, plus a `Set-Cookie` value when a new id had to
/// be issued.
pub struct SessionId {
    pub id: String,
    pub set_cookie: Option<HeaderValue>,
}

impl SessionId {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        if let Some(id) = read_cookie(headers) {
            return Self {
                id,
                set_cookie: None,
            };
        }

        let id = uuid::Uuid::new_v4().to_string();
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        Self {
            set_cookie: HeaderValue::from_str(&cookie).ok(),
            id,
        }
    }

    pub fn attach(&self, mut response: Response) -> Response {
        if let Some(cookie) = &self.set_cookie {
            response
                .headers_mut()
                .append(header::SET_COOKIE, cookie.clone());
        }
        response
    }
}

fn read_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| uuid::Uuid::parse_str(value.trim()).ok())
        .map(|id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_existing_cookie() {
        let id = "6f1c2b7e-8a47-4d8e-9a51-0c3b1f2d9e10";
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; kf_session={id}")).unwrap(),
        );

        let session = SessionId::from_headers(&headers);
        assert_eq!(session.id, id);
        assert!(session.set_cookie.is_none());
    }

    #[test]
    fn test_issues_cookie_for_missing_or_garbage_id() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("kf_session=not-a-uuid"));

        let session = SessionId::from_headers(&headers);
        assert!(uuid::Uuid::parse_str(&session.id).is_ok());
        let cookie = session.set_cookie.unwrap();
        assert!(cookie.to_str().unwrap().starts_with("kf_session="));

        let fresh = SessionId::from_headers(&HeaderMap::new());
        assert!(fresh.set_cookie.is_some());
    }
}
