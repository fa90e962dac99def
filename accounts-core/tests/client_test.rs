//! Client round-trips against live servers on ephemeral ports
//!
//! Run with: cargo test --test client_test -- --nocapture

use std::net::SocketAddr;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use axum::Router;

use accounts_core::adapters::InMemoryAccountStore;
use accounts_core::api::rpc::types::codes;
use accounts_core::api::{self, http, rpc, ApiState};
use accounts_core::client::{AccountClient, ClientError, HttpAccountClient, RpcAccountClient};
use accounts_core::services::AccountService;

/// Start a server on its own thread and runtime; returns the bound address
fn spawn_server(make_router: fn(ApiState) -> Router) -> SocketAddr {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let service = AccountService::new(Arc::new(InMemoryAccountStore::new()));
            let listener = api::bind("127.0.0.1", 0).await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            api::serve(listener, make_router(ApiState::new(service)))
                .await
                .unwrap();
        });
    });

    rx.recv().unwrap()
}

/// Start both front-ends over one shared store; returns (http, rpc) addresses
fn spawn_combined_server() -> (SocketAddr, SocketAddr) {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let service = AccountService::new(Arc::new(InMemoryAccountStore::new()));
            let http_listener = api::bind("127.0.0.1", 0).await.unwrap();
            let rpc_listener = api::bind("127.0.0.1", 0).await.unwrap();
            tx.send((
                http_listener.local_addr().unwrap(),
                rpc_listener.local_addr().unwrap(),
            ))
            .unwrap();
            api::serve_all(http_listener, rpc_listener, ApiState::new(service))
                .await
                .unwrap();
        });
    });

    rx.recv().unwrap()
}

fn http_client() -> HttpAccountClient {
    let addr = spawn_server(http::router);
    HttpAccountClient::for_host("127.0.0.1", addr.port()).unwrap()
}

fn rpc_client() -> RpcAccountClient {
    let addr = spawn_server(rpc::router);
    RpcAccountClient::for_host("127.0.0.1", addr.port()).unwrap()
}

/// The same session works over any transport
fn exercise(client: &dyn AccountClient) {
    client.create("alice", 50).unwrap();
    client.change_amount("alice", 75).unwrap();
    client.change_name("alice", "alicia").unwrap();

    let account = client.get("alicia").unwrap();
    assert_eq!(account.name, "alicia");
    assert_eq!(account.amount, 75);

    client.delete("alicia").unwrap();
}

#[test]
fn test_http_client_session() {
    let client = http_client();
    exercise(&client);

    match client.get("alicia").unwrap_err() {
        ClientError::Server { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "account not found");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_http_client_reports_conflicts() {
    let client = http_client();
    client.create("alice", 1).unwrap();

    match client.create("alice", 2).unwrap_err() {
        ClientError::Server { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "account already exists");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_rpc_client_session() {
    let client = rpc_client();
    exercise(&client);

    match client.get("alicia").unwrap_err() {
        ClientError::Rpc { code, message } => {
            assert_eq!(code, codes::NOT_FOUND);
            assert_eq!(message, "account not found");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_rpc_client_reports_validation() {
    let client = rpc_client();

    match client.create("", 2).unwrap_err() {
        ClientError::Rpc { code, message } => {
            assert_eq!(code, codes::INVALID_ARGUMENT);
            assert_eq!(message, "empty name");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_combined_server_shares_one_store() {
    let (http_addr, rpc_addr) = spawn_combined_server();
    let http = HttpAccountClient::for_host("127.0.0.1", http_addr.port()).unwrap();
    let rpc = RpcAccountClient::for_host("127.0.0.1", rpc_addr.port()).unwrap();

    http.create("alice", 50).unwrap();
    let account = rpc.get("alice").unwrap();
    assert_eq!(account.name, "alice");
    assert_eq!(account.amount, 50);

    rpc.change_name("alice", "alicia").unwrap();
    rpc.change_amount("alicia", -5).unwrap();
    let account = http.get("alicia").unwrap();
    assert_eq!(account.amount, -5);

    // A conflict seen through one front-end exists in the other
    match rpc.create("alicia", 1).unwrap_err() {
        ClientError::Rpc { code, .. } => assert_eq!(code, codes::ALREADY_EXISTS),
        other => panic!("unexpected error: {}", other),
    }

    http.delete("alicia").unwrap();
    match rpc.get("alicia").unwrap_err() {
        ClientError::Rpc { code, .. } => assert_eq!(code, codes::NOT_FOUND),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_unreachable_server_is_transport_error() {
    // Bind then drop to get a port nobody listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let client = RpcAccountClient::for_host("127.0.0.1", port).unwrap();
    assert!(matches!(client.get("alice"), Err(ClientError::Transport(_))));
}
