//! Integration tests for Car Finder.
//!
//! Each test spawns the catalog service on an ephemeral port (with the
//! simulated latency disabled) and exercises the real HTTP contract with
//! `reqwest`, so no external setup is required.
//!
//! # Test Categories
//!
//! - `catalog_endpoints` - `/cars`, `/cars/{id}`, `/health`
//! - `search_view` - the `/search` query-string contract
//! - `wishlist_sync` - cross-process wishlist convergence

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use car_finder_server::catalog::Catalog;
use car_finder_server::config::ServerConfig;
use car_finder_server::state::AppState;

/// Spawn the service on an ephemeral port and return its base URL.
///
/// The server task is detached; it lives for the remainder of the test
/// process, which is fine for test-sized lifetimes.
pub async fn spawn_server() -> String {
    spawn_server_with_delay(Duration::ZERO).await
}

/// Spawn the service with a specific simulated latency.
pub async fn spawn_server_with_delay(api_delay: Duration) -> String {
    let config = ServerConfig {
        api_delay,
        ..ServerConfig::default()
    };
    let catalog = Catalog::load_embedded().expect("embedded catalog must parse");
    let state = AppState::new(config, catalog);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().expect("listener has a local addr");

    tokio::spawn(async move {
        axum::serve(listener, car_finder_server::app(state))
            .await
            .expect("server error");
    });

    format!("http://{addr}")
}
