// Transport-agnostic description of one API call.
//
// Endpoint builders in `local::endpoints` and `cloud::endpoints` produce
// these; the clients resolve the relative path against their base URL.

use reqwest::Method;
use serde_json::Value;

/// One call against either API, relative to that API's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Relative path without a leading slash, e.g. `lock/12/unlock`.
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// `path?query` form, used for logging and error messages.
    pub fn display_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{}?{}", self.path, query.join("&"))
    }
}

/// The `mode` query parameter of the unlock operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockMode {
    /// Plain unlock.
    Unlock,
    /// Unlock, then pull the latch.
    UnlockAndPull,
}

impl UnlockMode {
    pub fn code(self) -> u8 {
        match self {
            Self::Unlock => 3,
            Self::UnlockAndPull => 4,
        }
    }
}
