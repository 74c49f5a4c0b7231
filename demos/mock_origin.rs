//! Stand-in blog origin for trying the proxy locally.
//!
//! ```text
//! cargo run --example mock_origin
//! ORIGIN_URL=http://127.0.0.1:8081/ cargo run
//! ```

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = Router::new()
        .route("/", get(|| async { "Latest posts: red fox, barn owl" }))
        .route("/healthz", get(|| async { "ok" }))
        .route("/species", get(|| async { "Species: fox, owl, otter" }))
        .route(
            "/species/old",
            get(|| async { (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/species")]) }),
        )
        .route(
            "/post/new",
            post(|body: String| async move {
                (StatusCode::CREATED, format!("received {} bytes", body.len())).into_response()
            }),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    println!("Mock origin listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
