//! Handler trait, continuation, and type erasure.
//!
//! # How async handlers are stored
//!
//! A route holds a *chain* of handlers of **different** concrete types. Rust
//! collections can only hold one concrete type, so we use trait objects
//! (`dyn ErasedHandler`) to hide the concrete handler type behind a common
//! interface and store everything uniformly.
//!
//! The chain from user code to vtable call is:
//!
//! ```text
//! async fn auth(req: Request, next: Next) -> Response { … }   ← user writes this
//!        ↓ handlers![auth, …]
//! auth.into_boxed_handler()                                   ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(auth))                                   ← heap-allocated wrapper
//!        ↓  stored as BoxedHandler = Arc<dyn ErasedHandler>
//! handler.call(req, next)  at request time                    ← one vtable dispatch
//!        ↓
//! Box::pin(async { auth(req, next).await.into_response() })   ← BoxFuture
//! ```
//!
//! The only runtime cost per request is **one Arc clone** (atomic inc) +
//! **one virtual call** per chain link — negligible compared to network I/O.
//!
//! # The continuation contract
//!
//! Every handler receives the request and a [`Next`]. A handler either
//! terminates the exchange by returning a response without touching `next`,
//! or hands the (possibly mutated) request to the rest of the chain with
//! `next.run(req).await`. Running off the end of a chain yields
//! `404 Not Found`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http::StatusCode;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Pin<Box<…>>` is required because the async runtime must be able to poll
/// the future in-place — it cannot move it in memory after the first poll.
/// `Send + 'static` let tokio move the future across threads safely.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
/// External crates cannot usefully interact with this trait.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

/// A heap-allocated, type-erased handler shared across concurrent requests.
///
/// This is what [`HandlerTree::flatten`](crate::HandlerTree::flatten)
/// produces and what a routing object stores per route. `Arc` gives cheap,
/// thread-safe shared ownership (one atomic reference count increment per
/// request) without copying the handler.
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` with the signature:
///
/// ```text
/// async fn name(req: Request, next: Next) -> impl IntoResponse
/// ```
///
/// The trait is **sealed** (via the private `Sealed` supertrait): only the
/// blanket impl below can satisfy it. This prevents accidental misuse and
/// keeps the API surface stable across versions.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

/// The sealing module. Because `Sealed` is private, external crates cannot
/// name it and therefore cannot implement `Handler` on their own types.
mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

/// Implement the sealing trait for any function with the right signature.
///
/// `Fn(Request, Next) -> Fut` covers:
///   - named `async fn` items
///   - closures returning an `async move` block
///   - any struct that implements `Fn`
impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

/// Implement `Handler` for any function with the right signature.
impl<F, Fut, R> Handler for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Newtype wrapper that holds a concrete handler `F` and implements
/// [`ErasedHandler`], bridging the typed world to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        // Call the wrapped function — this returns the concrete `Fut`.
        // We then map it to `Response` via `IntoResponse` and box the whole
        // thing so the return type matches the trait signature.
        let fut = (self.0)(req, next);
        Box::pin(async move { fut.await.into_response() })
    }
}

// ── Chain and Next ────────────────────────────────────────────────────────────

/// An ordered, immutable sequence of erased handlers.
///
/// This is what a routing object stores per route: the flattened form of
/// everything registered for a path. Cloning is one atomic increment — the
/// handlers themselves are shared.
#[derive(Clone)]
pub struct Chain(Arc<[BoxedHandler]>);

impl Chain {
    pub fn new(handlers: Vec<BoxedHandler>) -> Self {
        Self(handlers.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Runs the chain from the front. An empty chain yields `404 Not Found`.
    pub async fn run(&self, req: Request) -> Response {
        Next { chain: Arc::clone(&self.0), index: 0 }.run(req).await
    }
}

/// The continuation handed to every handler.
///
/// `next.run(req)` invokes the remainder of the chain. A handler that never
/// calls it terminates the exchange with its own response. `Next` is
/// consumed by `run` — a handler cannot invoke the rest of the chain twice.
pub struct Next {
    chain: Arc<[BoxedHandler]>,
    index: usize,
}

impl Next {
    /// Hands `req` to the next handler in the chain.
    ///
    /// Invoking the continuation at the end of the chain yields
    /// `404 Not Found`, matching what a request falling off the last route
    /// handler gets.
    pub async fn run(self, req: Request) -> Response {
        match self.chain.get(self.index) {
            Some(handler) => {
                let next = Next { chain: Arc::clone(&self.chain), index: self.index + 1 };
                handler.call(req, next).await
            }
            None => Response::status(StatusCode::NOT_FOUND),
        }
    }
}
