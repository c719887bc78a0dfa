//! # route-group
//!
//! Group route registrations so shared middleware wraps every handler
//! declared in a block. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! The routing object owns routing: path syntax, verb matching, dispatch.
//! route-group does not — by design. A grouping call only rewrites what a
//! registration *says*: it splices the group's middleware ahead of (or
//! behind) the handlers you register inside its scope, then gets out of the
//! way. Anything implementing [`Routes`] can be grouped — the bundled
//! [`Router`] is one such implementor, there so grouped routes can be served
//! and tested end-to-end without dragging in another framework.
//!
//! - **Before groups** — [`before_each`]: middleware runs ahead of every
//!   route in the scope; outer groups run before inner ones.
//! - **After groups** — [`after_each`]: middleware runs behind every route
//!   in the scope; outer groups run after inner ones.
//! - **Nesting** — the grouping proxy implements [`Routes`], so scopes nest
//!   to any depth and the method form ([`RoutesExt`]) works inside them.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use route_group::{before_each, Next, Request, Response, Router, Routes, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut app = Router::new();
//!
//!     app.post("/login", login);
//!
//!     before_each(&mut app, authenticate, |app| {
//!         app.get("/users/{id}", get_user);
//!         app.delete("/users/{id}", delete_user);
//!     });
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn authenticate(req: Request, next: Next) -> Response {
//!     if req.header("authorization").is_none() {
//!         return Response::status(route_group::StatusCode::UNAUTHORIZED);
//!     }
//!     next.run(req).await
//! }
//!
//! async fn login(_req: Request, _next: Next) -> Response {
//!     Response::text("welcome")
//! }
//!
//! async fn get_user(req: Request, _next: Next) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes())
//! }
//!
//! async fn delete_user(_req: Request, _next: Next) -> Response {
//!     Response::status(route_group::StatusCode::NO_CONTENT)
//! }
//! ```

mod error;
mod group;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod routes;
mod server;
mod tree;

pub use error::Error;
pub use group::{Group, RoutesExt, after_each, before_each};
pub use handler::{BoxedHandler, Chain, Handler, Next};
pub use http::StatusCode;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use routes::Routes;
pub use server::Server;
pub use tree::HandlerTree;
