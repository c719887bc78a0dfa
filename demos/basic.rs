//! Minimal route-group example — grouped JSON endpoints behind shared middleware.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/login -X POST
//!   curl http://localhost:3000/users/42                      # 401, not in the club
//!   curl http://localhost:3000/users/42 -H 'authorization: anything'
//!   curl http://localhost:3000/users/42 -X DELETE -H 'authorization: anything'

use route_group::{
    Next, Request, Response, Router, Routes, RoutesExt, Server, StatusCode, handlers,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut app = Router::new();

    // Outside any group — reachable without credentials.
    app.post("/login", login);

    // Everything in this scope runs authenticate, then request_id, before
    // its own handlers. Nested groups stack: the audit log below only wraps
    // the destructive routes.
    app.before_each(handlers![authenticate, request_id], |app| {
        app.get("/users/{id}", get_user);

        app.before_each(audit, |app| {
            app.delete("/users/{id}", delete_user);
        });
    });

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

// ── Middleware ────────────────────────────────────────────────────────────────

// Anything in the authorization header will do. A real app would verify it.
async fn authenticate(req: Request, next: Next) -> Response {
    if req.header("authorization").is_none() {
        return Response::status(StatusCode::UNAUTHORIZED);
    }
    next.run(req).await
}

#[derive(Clone)]
struct RequestId(u64);

async fn request_id(mut req: Request, next: Next) -> Response {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    req.extensions_mut().insert(RequestId(COUNTER.fetch_add(1, Ordering::Relaxed)));
    next.run(req).await
}

async fn audit(req: Request, next: Next) -> Response {
    let id = req.extensions().get::<RequestId>().map_or(0, |r| r.0);
    tracing::info!(request = id, path = req.path(), "destructive route invoked");
    next.run(req).await
}

// ── Route handlers ────────────────────────────────────────────────────────────

async fn login(_req: Request, _next: Next) -> Response {
    Response::text("welcome")
}

async fn get_user(req: Request, _next: Next) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::json(format!(r#"{{"id":"{id}","name":"alice"}}"#).into_bytes())
}

async fn delete_user(_req: Request, _next: Next) -> Response {
    Response::status(StatusCode::NO_CONTENT)
}
