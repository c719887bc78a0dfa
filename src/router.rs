//! Radix-tree request router.
//!
//! The bundled [`Routes`] implementor: one tree per HTTP method plus a
//! wildcard tree, O(path-length) lookup via [`matchit`]. Registrations are
//! flattened into handler [`Chain`]s at insert time; dispatch runs the
//! matched chain with the continuation threaded through it.

use std::collections::HashMap;

use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::handler::Chain;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::routes::Routes;
use crate::tree::HandlerTree;

/// The application router.
///
/// Build it once at startup, register routes (grouped or not) through the
/// [`Routes`] surface, then pass it to [`Server::serve`](crate::Server::serve)
/// — or call [`dispatch`](Router::dispatch) directly in tests.
///
/// Path parameters use `{name}` syntax — `req.param("name")` retrieves them:
///
/// ```rust,no_run
/// # use route_group::{Request, Response, Router, Routes, Next};
/// # async fn get_user(_: Request, _: Next) -> Response { Response::text("") }
/// # async fn create_user(_: Request, _: Next) -> Response { Response::text("") }
/// let mut app = Router::new();
/// app.get("/users/{id}", get_user);
/// app.post("/users", create_user);
/// ```
pub struct Router {
    verbs: HashMap<Method, MatchitRouter<Chain>>,
    any: MatchitRouter<Chain>,
}

impl Router {
    pub fn new() -> Self {
        Self { verbs: HashMap::new(), any: MatchitRouter::new() }
    }

    /// Matches `method` + `path` to a registered chain.
    ///
    /// The method's own tree wins; the wildcard tree answers for any method
    /// the named trees miss.
    fn lookup(&self, method: Method, path: &str) -> Option<(Chain, HashMap<String, String>)> {
        let matched = match self.verbs.get(&method).and_then(|tree| tree.at(path).ok()) {
            Some(m) => m,
            None => self.any.at(path).ok()?,
        };
        let chain = matched.value.clone();
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((chain, params))
    }

    /// Routes one request through its matched handler chain.
    ///
    /// No match is `404 Not Found`. Matched path parameters are visible to
    /// every handler in the chain via [`Request::param`].
    pub async fn dispatch(&self, mut req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Some((chain, params)) => {
                req.set_params(params);
                chain.run(req).await
            }
            None => Response::status(http::StatusCode::NOT_FOUND),
        }
    }
}

impl Routes for Router {
    /// # Panics
    ///
    /// Panics if `path` is not a valid route pattern or conflicts with an
    /// existing registration.
    fn route(&mut self, method: Method, path: &str, handlers: HandlerTree) {
        let chain = Chain::new(handlers.flatten());
        debug!(%method, path, handlers = chain.len(), "route registered");
        self.verbs
            .entry(method)
            .or_default()
            .insert(path, chain)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
    }

    /// # Panics
    ///
    /// Panics if `path` is not a valid route pattern or conflicts with an
    /// existing wildcard registration.
    fn route_any(&mut self, path: &str, handlers: HandlerTree) {
        let chain = Chain::new(handlers.flatten());
        debug!(path, handlers = chain.len(), "wildcard route registered");
        self.any
            .insert(path, chain)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
