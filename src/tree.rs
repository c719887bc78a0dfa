//! Handler trees and flattening.
//!
//! Route registrations accept "a handler, or a nested sequence of handlers,
//! to arbitrary depth" — the call shape Express-style frameworks spell as
//! `app.get(path, h1, [h2, h3], h4)`. [`HandlerTree`] is that shape as a
//! type, and [`flatten`](HandlerTree::flatten) reduces it to the ordered
//! chain a router actually stores: depth-first, left-to-right, no
//! deduplication, no reordering beyond what nesting implies.
//!
//! A single handler converts with `From`/`Into`; the [`handlers!`] macro
//! builds lists and nests freely:
//!
//! ```rust
//! use route_group::{handlers, Next, Request, Response};
//!
//! async fn a(req: Request, next: Next) -> Response { next.run(req).await }
//! async fn b(req: Request, next: Next) -> Response { next.run(req).await }
//! async fn c(_req: Request, _next: Next) -> Response { Response::text("ok") }
//!
//! let flat = handlers![a, b, c];
//! let nested = handlers![a, handlers![b, c]];
//! assert_eq!(flat.flatten().len(), nested.flatten().len());
//! ```

use crate::handler::{BoxedHandler, Handler};

/// A handler, or a nested sequence of handlers, to arbitrary depth.
///
/// Empty trees are legal and flatten to an empty chain.
#[derive(Clone)]
pub struct HandlerTree(Node);

#[derive(Clone)]
enum Node {
    Leaf(BoxedHandler),
    List(Vec<HandlerTree>),
}

impl HandlerTree {
    /// A tree with no handlers at all.
    pub fn empty() -> Self {
        Self(Node::List(Vec::new()))
    }

    /// An ordered sequence of subtrees.
    pub fn list(items: Vec<HandlerTree>) -> Self {
        Self(Node::List(items))
    }

    pub(crate) fn leaf(handler: BoxedHandler) -> Self {
        Self(Node::Leaf(handler))
    }

    /// Reduces the tree to a single ordered sequence of erased handlers:
    /// depth-first, left-to-right, unbounded depth.
    pub fn flatten(self) -> Vec<BoxedHandler> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<BoxedHandler>) {
        match self.0 {
            Node::Leaf(handler) => out.push(handler),
            Node::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

impl<H: Handler> From<H> for HandlerTree {
    fn from(handler: H) -> Self {
        Self(Node::Leaf(handler.into_boxed_handler()))
    }
}

/// Builds a [`HandlerTree`] from any mix of handlers and nested
/// `handlers![...]` lists.
///
/// ```rust,ignore
/// app.get("/users", handlers![authenticate, handlers![audit, throttle], list_users]);
/// ```
#[macro_export]
macro_rules! handlers {
    () => {
        $crate::HandlerTree::empty()
    };
    ($($handler:expr),+ $(,)?) => {
        $crate::HandlerTree::list(::std::vec![$($crate::HandlerTree::from($handler)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{Chain, Next};
    use crate::method::Method;
    use crate::request::Request;
    use crate::response::Response;

    // Each marker appends its name to the trail; the last one echoes it.
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

    async fn run(tree: HandlerTree) -> String {
        let chain = Chain::new(tree.flatten());
        let res = chain.run(Request::new(Method::Get, "/")).await;
        String::from_utf8(res.body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn flattening_is_depth_first_left_to_right() {
        let tree = handlers![
            mark("a"),
            handlers![mark("b"), handlers![mark("c"), mark("d")]],
            mark("e"),
            echo,
        ];
        assert_eq!(run(tree).await, "a,b,c,d,e");
    }

    #[tokio::test]
    async fn nesting_does_not_change_order() {
        let flat = handlers![mark("a"), mark("b"), mark("c"), echo];
        let nested = handlers![handlers![mark("a")], handlers![mark("b"), mark("c")], echo];
        assert_eq!(run(flat).await, run(nested).await);
    }

    #[tokio::test]
    async fn empty_tree_flattens_to_nothing() {
        assert!(handlers![].flatten().is_empty());
        assert!(HandlerTree::list(vec![handlers![], handlers![]]).flatten().is_empty());
    }

    #[test]
    fn single_handler_converts_directly() {
        let tree: HandlerTree = HandlerTree::from(echo);
        assert_eq!(tree.flatten().len(), 1);
    }
}
