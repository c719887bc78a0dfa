//! Grouped route registration.
//!
//! [`before_each`] and [`after_each`] wrap a routing object in an ephemeral
//! proxy ([`Group`]) for the duration of a scope closure. Every route
//! registered through the proxy gets the group's middleware spliced in —
//! ahead of the route's own handlers for `before_each`, behind them for
//! `after_each`. The proxy implements [`Routes`] itself, so groups nest:
//!
//! ```rust
//! use route_group::{before_each, Next, Request, Response, Router, Routes, RoutesExt};
//!
//! # async fn authenticate(req: Request, next: Next) -> Response { next.run(req).await }
//! # async fn audit(req: Request, next: Next) -> Response { next.run(req).await }
//! # async fn list_users(_req: Request, _next: Next) -> Response { Response::text("") }
//! # async fn delete_user(_req: Request, _next: Next) -> Response { Response::text("") }
//! # async fn login(_req: Request, _next: Next) -> Response { Response::text("") }
//! let mut app = Router::new();
//!
//! app.post("/login", login);                      // untouched
//!
//! before_each(&mut app, authenticate, |app| {
//!     app.get("/users", list_users);              // authenticate → list_users
//!
//!     app.before_each(audit, |app| {
//!         app.delete("/users/{id}", delete_user); // authenticate → audit → delete_user
//!     });
//! });
//! ```
//!
//! Nesting order: for `before_each`, the outer group's middleware always runs
//! first; for `after_each`, it always runs last. The middleware argument is
//! flattened once per grouping call; the caller's per-route handlers are
//! handed to the underlying routing object in their original nested shape,
//! which flattens them at registration time like any other registration.
//!
//! The proxy holds nothing but the borrow of the underlying routing object,
//! the flattened middleware, and the splice order. It is gone when the scope
//! closure returns; all that remains are the routes it registered.

use crate::handler::BoxedHandler;
use crate::method::Method;
use crate::routes::Routes;
use crate::tree::HandlerTree;

// ── Splice order ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Order {
    Before,
    After,
}

// ── Group proxy ───────────────────────────────────────────────────────────────

/// The proxy routing object handed to a grouping scope.
///
/// Registrations made through it are forwarded to the underlying routing
/// object with the group's middleware spliced around the caller's handlers.
/// Nothing else about the registration is touched — path syntax, verb
/// semantics and matching rules stay the underlying object's business.
pub struct Group<'a, R> {
    routes: &'a mut R,
    middleware: Vec<BoxedHandler>,
    order: Order,
}

impl<R: Routes> Group<'_, R> {
    fn splice(&self, handlers: HandlerTree) -> HandlerTree {
        let middleware = HandlerTree::list(
            self.middleware.iter().cloned().map(HandlerTree::leaf).collect(),
        );
        match self.order {
            Order::Before => HandlerTree::list(vec![middleware, handlers]),
            Order::After => HandlerTree::list(vec![handlers, middleware]),
        }
    }
}

impl<R: Routes> Routes for Group<'_, R> {
    fn route(&mut self, method: Method, path: &str, handlers: HandlerTree) {
        let spliced = self.splice(handlers);
        self.routes.route(method, path, spliced);
    }

    fn route_any(&mut self, path: &str, handlers: HandlerTree) {
        let spliced = self.splice(handlers);
        self.routes.route_any(path, spliced);
    }
}

// ── Free operations ───────────────────────────────────────────────────────────

/// Runs `scope` against a proxy that prepends `middleware` to every route
/// registered through it.
///
/// `routes` accepts either `&mut R` directly or an `Option<&mut R>` for
/// conditional grouping. `None` is a silent no-op: the scope closure is not
/// invoked and nothing is registered.
///
/// The scope closure is invoked exactly once, synchronously; every
/// registration it makes lands on the underlying routing object before this
/// function returns. A panic inside the closure propagates unchanged.
pub fn before_each<'a, R: Routes + 'a>(
    routes: impl Into<Option<&'a mut R>>,
    middleware: impl Into<HandlerTree>,
    scope: impl FnOnce(&mut Group<'a, R>),
) {
    group(routes.into(), Order::Before, middleware.into(), scope);
}

/// Like [`before_each`], but the group's middleware runs *after* the route's
/// own handlers.
///
/// Under nesting the outer group's middleware always runs last: a route in
/// the innermost scope executes as route handlers → inner middleware → outer
/// middleware.
pub fn after_each<'a, R: Routes + 'a>(
    routes: impl Into<Option<&'a mut R>>,
    middleware: impl Into<HandlerTree>,
    scope: impl FnOnce(&mut Group<'a, R>),
) {
    group(routes.into(), Order::After, middleware.into(), scope);
}

fn group<'a, R: Routes>(
    routes: Option<&'a mut R>,
    order: Order,
    middleware: HandlerTree,
    scope: impl FnOnce(&mut Group<'a, R>),
) {
    let Some(routes) = routes else { return };
    let mut proxy = Group { routes, middleware: middleware.flatten(), order };
    scope(&mut proxy);
}

// ── Method-call form ──────────────────────────────────────────────────────────

/// Grouping as methods on the routing object itself.
///
/// Blanket-implemented for every [`Routes`] — bringing the trait into scope
/// is all the installation there is, and it covers the proxy too, so nested
/// calls keep the method form:
///
/// ```rust
/// use route_group::{Router, Routes, RoutesExt};
///
/// # use route_group::{Next, Request, Response};
/// # async fn authenticate(req: Request, next: Next) -> Response { next.run(req).await }
/// # async fn list_users(_req: Request, _next: Next) -> Response { Response::text("") }
/// let mut app = Router::new();
/// app.before_each(authenticate, |app| {
///     app.get("/users", list_users);
/// });
/// ```
pub trait RoutesExt: Routes + Sized {
    /// Method form of [`before_each`].
    fn before_each<'a>(
        &'a mut self,
        middleware: impl Into<HandlerTree>,
        scope: impl FnOnce(&mut Group<'a, Self>),
    ) {
        before_each(self, middleware, scope);
    }

    /// Method form of [`after_each`].
    fn after_each<'a>(
        &'a mut self,
        middleware: impl Into<HandlerTree>,
        scope: impl FnOnce(&mut Group<'a, Self>),
    ) {
        after_each(self, middleware, scope);
    }
}

impl<R: Routes> RoutesExt for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{Chain, Handler, Next};
    use crate::handlers;
    use crate::request::Request;
    use crate::response::Response;

    /// Captures registrations as runnable chains.
    #[derive(Default)]
    struct Recorder {
        routed: Vec<(Method, String, Chain)>,
        any: Vec<(String, Chain)>,
    }

    impl Routes for Recorder {
        fn route(&mut self, method: Method, path: &str, handlers: HandlerTree) {
            self.routed.push((method, path.to_owned(), Chain::new(handlers.flatten())));
        }

        fn route_any(&mut self, path: &str, handlers: HandlerTree) {
            self.any.push((path.to_owned(), Chain::new(handlers.flatten())));
        }
    }

    impl Recorder {
        fn chain(&self, path: &str) -> &Chain {
            &self.routed.iter().find(|(_, p, _)| p == path).unwrap().2
        }
    }

    #[derive(Default, Clone)]
    struct Trail(Vec<&'static str>);

    fn mark(name: &'static str) -> impl Handler {
        move |mut req: Request, next: Next| async move {
            if req.extensions().get::<Trail>().is_none() {
                req.extensions_mut().insert(Trail::default());
            }
            req.extensions_mut().get_mut::<Trail>().unwrap().0.push(name);
            next.run(req).await
        }
    }

    async fn echo(req: Request, _next: Next) -> Response {
        let trail = req.extensions().get::<Trail>().cloned().unwrap_or_default();
        Response::text(trail.0.join(","))
    }

    async fn ran(chain: &Chain) -> String {
        let res = chain.run(Request::new(Method::Get, "/")).await;
        String::from_utf8(res.body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn middleware_runs_before_route_handlers() {
        let mut rec = Recorder::default();
        before_each(&mut rec, mark("mw"), |app| {
            app.get("/grouped", handlers![mark("own"), echo]);
        });
        rec.get("/plain", handlers![mark("own"), echo]);

        assert_eq!(ran(rec.chain("/grouped")).await, "mw,own");
        assert_eq!(ran(rec.chain("/plain")).await, "own");
    }

    #[tokio::test]
    async fn after_middleware_runs_behind_route_handlers() {
        let mut rec = Recorder::default();
        after_each(&mut rec, handlers![mark("late"), echo], |app| {
            app.get("/grouped", mark("own"));
        });

        // The route's own handler passes through, then the group's tail runs.
        assert_eq!(ran(rec.chain("/grouped")).await, "own,late");
    }

    #[tokio::test]
    async fn nested_before_keeps_outer_first() {
        let mut rec = Recorder::default();
        before_each(&mut rec, mark("outer"), |app| {
            app.get("/shallow", echo);
            before_each(&mut *app, mark("inner"), |app| {
                app.get("/deep", echo);
            });
        });

        assert_eq!(ran(rec.chain("/shallow")).await, "outer");
        assert_eq!(ran(rec.chain("/deep")).await, "outer,inner");
    }

    #[tokio::test]
    async fn nested_after_keeps_outer_last() {
        let mut rec = Recorder::default();
        after_each(&mut rec, handlers![mark("outer"), echo], |app| {
            after_each(&mut *app, mark("inner"), |app| {
                app.get("/deep", mark("own"));
            });
        });

        assert_eq!(ran(rec.chain("/deep")).await, "own,inner,outer");
    }

    #[tokio::test]
    async fn separate_arguments_and_nested_lists_flatten_identically() {
        let mut spread = Recorder::default();
        before_each(&mut spread, handlers![mark("a"), mark("b"), mark("c")], |app| {
            app.get("/r", echo);
        });

        let mut nested = Recorder::default();
        before_each(&mut nested, handlers![handlers![mark("a"), mark("b")], mark("c")], |app| {
            app.get("/r", echo);
        });

        assert_eq!(ran(spread.chain("/r")).await, ran(nested.chain("/r")).await);
    }

    #[tokio::test]
    async fn wildcard_registrations_are_spliced_too() {
        let mut rec = Recorder::default();
        before_each(&mut rec, mark("mw"), |app| {
            app.all("/any", echo);
        });

        let (path, chain) = &rec.any[0];
        assert_eq!(path, "/any");
        assert_eq!(ran(chain).await, "mw");
    }

    #[tokio::test]
    async fn method_form_matches_free_form() {
        let mut rec = Recorder::default();
        rec.before_each(mark("outer"), |app| {
            app.get("/shallow", echo);
            app.before_each(mark("inner"), |app| {
                app.get("/deep", echo);
            });
        });

        assert_eq!(ran(rec.chain("/shallow")).await, "outer");
        assert_eq!(ran(rec.chain("/deep")).await, "outer,inner");
    }

    #[test]
    fn absent_routing_object_is_a_no_op() {
        before_each(None::<&mut Recorder>, handlers![], |_app| {
            panic!("scope must not run without a routing object");
        });
        after_each(None::<&mut Recorder>, handlers![], |_app| {
            panic!("scope must not run without a routing object");
        });
    }

    #[tokio::test]
    async fn conditional_grouping_through_option() {
        let mut rec = Recorder::default();
        let mut maybe = Some(&mut rec);
        before_each(maybe.take(), mark("mw"), |app| {
            app.get("/r", echo);
        });
        assert_eq!(ran(rec.chain("/r")).await, "mw");
    }

    #[tokio::test]
    async fn empty_middleware_list_degenerates_to_plain_registration() {
        let mut rec = Recorder::default();
        before_each(&mut rec, handlers![], |app| {
            app.get("/r", echo);
        });
        assert_eq!(rec.chain("/r").len(), 1);
    }
}
