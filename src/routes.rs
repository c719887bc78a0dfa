//! The routing surface a grouping call wraps.
//!
//! Anything that can accept "register these handlers for this method and
//! path" implements [`Routes`]: the bundled [`Router`](crate::Router), a
//! grouping proxy ([`Group`](crate::Group)), or your own adapter over a
//! different framework's router. The grouping operations are generic over
//! this trait — that is the whole trick: a [`Group`](crate::Group) is itself
//! a `Routes`, so groups nest without any special plumbing.
//!
//! Implementors write two methods; callers get the per-verb surface for free.

use crate::method::Method;
use crate::tree::HandlerTree;

/// Per-verb route registration.
///
/// The implementor owns all matching semantics — path syntax, verb fallback,
/// duplicate handling. It is expected to flatten the registered tree itself
/// (via [`HandlerTree::flatten`]); callers hand over trees in whatever
/// nested shape they were built.
pub trait Routes {
    /// Registers `handlers` for a single method + path pair.
    fn route(&mut self, method: Method, path: &str, handlers: HandlerTree);

    /// Registers `handlers` for every method on `path` (the wildcard verb).
    fn route_any(&mut self, path: &str, handlers: HandlerTree);

    fn get(&mut self, path: &str, handlers: impl Into<HandlerTree>) {
        self.route(Method::Get, path, handlers.into());
    }

    fn head(&mut self, path: &str, handlers: impl Into<HandlerTree>) {
        self.route(Method::Head, path, handlers.into());
    }

    fn post(&mut self, path: &str, handlers: impl Into<HandlerTree>) {
        self.route(Method::Post, path, handlers.into());
    }

    fn put(&mut self, path: &str, handlers: impl Into<HandlerTree>) {
        self.route(Method::Put, path, handlers.into());
    }

    fn delete(&mut self, path: &str, handlers: impl Into<HandlerTree>) {
        self.route(Method::Delete, path, handlers.into());
    }

    fn connect(&mut self, path: &str, handlers: impl Into<HandlerTree>) {
        self.route(Method::Connect, path, handlers.into());
    }

    fn options(&mut self, path: &str, handlers: impl Into<HandlerTree>) {
        self.route(Method::Options, path, handlers.into());
    }

    fn trace(&mut self, path: &str, handlers: impl Into<HandlerTree>) {
        self.route(Method::Trace, path, handlers.into());
    }

    fn patch(&mut self, path: &str, handlers: impl Into<HandlerTree>) {
        self.route(Method::Patch, path, handlers.into());
    }

    /// The wildcard convenience — Express's `app.all`.
    fn all(&mut self, path: &str, handlers: impl Into<HandlerTree>) {
        self.route_any(path, handlers.into());
    }
}
