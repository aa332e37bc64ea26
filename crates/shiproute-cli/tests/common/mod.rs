#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use axum::http::{header, StatusCode};
use axum::routing::post;
use axum::Router;
use tokio::runtime::Runtime;

pub const FOUND: &str = r#"{
    "success": true,
    "total_distance": 8288.4,
    "path": [2, 9, 24],
    "ports": [
        {"id": 2, "name": "Singapore", "coordinates": [103.8198, 1.3521]},
        {"id": 9, "name": "Colombo", "coordinates": [79.8612, 6.9271]},
        {"id": 24, "name": "Rotterdam", "coordinates": [4.47917, 51.9225]}
    ],
    "route_coordinates": [
        {"Longtitude": 103.8198, "latitude": 1.3521},
        {"Longtitude": 79.8612, "latitude": 6.9271},
        {"Longtitude": 43.1456, "latitude": 11.5721},
        {"Longtitude": 4.47917, "latitude": 51.9225}
    ]
}"#;

pub const NOT_FOUND: &str =
    r#"{"success": false, "message": "No valid route found with the given fuel constraint."}"#;

/// Routing service stub answering every POST with a fixed response.
///
/// The server runs on its own runtime so it keeps serving while the test
/// thread blocks on the CLI process.
pub struct StubService {
    pub endpoint: String,
    _runtime: Runtime,
}

pub fn spawn_stub(status: StatusCode, body: &'static str) -> StubService {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("stub runtime");
    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .expect("bind stub");
    let addr = listener.local_addr().expect("stub address");
    let app = Router::new().route(
        "/api/route",
        post(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
    );
    runtime.spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    StubService {
        endpoint: format!("http://{addr}/api/route"),
        _runtime: runtime,
    }
}

pub fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("shiproute");
    cmd.env("NO_COLOR", "1")
        .env("RUST_LOG", "error")
        .env_remove("LOG_FORMAT");
    cmd
}

pub fn route_cmd(endpoint: &str, start: &str, end: &str, max_fuel: &str) -> Command {
    let mut cmd = cli();
    cmd.arg("--endpoint")
        .arg(endpoint)
        .arg("--timeout-secs")
        .arg("5")
        .arg("route")
        .arg("--start")
        .arg(start)
        .arg("--end")
        .arg(end)
        .arg("--max-fuel")
        .arg(max_fuel);
    cmd
}
