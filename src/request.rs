//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::Extensions;

use crate::method::Method;

/// An incoming HTTP request, owned by whichever handler currently holds it.
///
/// A request travels down a handler chain *by value*: each handler receives
/// it, may mutate it, and hands it to the next handler via
/// [`Next::run`](crate::Next::run). Middleware leaves state for downstream
/// handlers in [`extensions`](Request::extensions_mut):
///
/// ```rust
/// use route_group::{Next, Request, Response, StatusCode};
///
/// #[derive(Clone)]
/// struct Authenticated(String);
///
/// async fn authenticate(mut req: Request, next: Next) -> Response {
///     let user = match req.header("authorization") {
///         Some(token) => token.to_owned(),
///         None => return Response::status(StatusCode::UNAUTHORIZED),
///     };
///     req.extensions_mut().insert(Authenticated(user));
///     next.run(req).await
/// }
/// ```
pub struct Request {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Bytes,
    params: HashMap<String, String>,
    extensions: Extensions,
}

impl Request {
    /// Builds a bare request — useful for driving a chain or a
    /// [`Router`](crate::Router) directly in tests.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: Bytes::new(),
            params: HashMap::new(),
            extensions: Extensions::new(),
        }
    }

    pub(crate) fn from_parts(
        method: Method,
        path: String,
        headers: Vec<(String, String)>,
        body: Bytes,
    ) -> Self {
        Self { method, path, headers, body, params: HashMap::new(), extensions: Extensions::new() }
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Typed per-request state, shared along the handler chain.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}
