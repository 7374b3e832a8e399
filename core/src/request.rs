//! Request descriptor types for the host-does-IO pattern.
//!
//! # Design
//! A form submission resolves to an `HttpRequest` described as plain data.
//! The core never touches the network; the caller (host) hands the
//! descriptor to whatever HTTP client it uses. `to_http` covers the common
//! case of clients built on the `http` crate types.
//!
//! All fields use owned types (`String`, `Vec`) so values can cross FFI
//! boundaries without lifetime concerns.

use serde::{Deserialize, Serialize};

/// HTTP method of a form submission. Forms only ever submit with GET or POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// Parse an already uppercased method name.
    pub(crate) fn from_upper(value: &str) -> Option<Self> {
        match value {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `convert`. GET requests carry no headers and an empty body;
/// POST requests carry exactly one `Content-Type` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Project the descriptor into an `http::Request`.
    pub fn to_http(&self) -> Result<http::Request<Vec<u8>>, http::Error> {
        let mut builder = http::Request::builder()
            .method(self.method.as_str())
            .uri(self.url.as_str());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> HttpRequest {
        HttpRequest {
            url: "https://example.com/login?next=%2F".to_string(),
            method: HttpMethod::Post,
            headers: vec![(
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            )],
            body: b"user=a&pass=b".to_vec(),
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = post();
        assert_eq!(
            req.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn to_http_maps_every_field() {
        let req = post().to_http().unwrap();
        assert_eq!(*req.method(), http::Method::POST);
        assert_eq!(req.uri().path(), "/login");
        assert_eq!(req.uri().query(), Some("next=%2F"));
        assert_eq!(
            req.headers()[http::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(req.body().as_slice(), b"user=a&pass=b");
    }

    #[test]
    fn method_serializes_uppercase() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::from_upper("POST"), Some(HttpMethod::Post));
        assert_eq!(HttpMethod::from_upper("post"), None);
    }
}
