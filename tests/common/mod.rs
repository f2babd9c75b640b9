use axum::Router;

/// Serve a router on an ephemeral local port and return its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock backend");
    });
    format!("http://{}", addr)
}

/// The catalog payload the real backend advertises, trimmed to the fields
/// the console reads.
pub fn catalog_json() -> serde_json::Value {
    serde_json::json!({
        "defaults": {
            "openapi": "/app/specs/openapi.json",
            "tokenFile": "/secrets/token.jwt",
            "preset": "full",
            "timeout": "5m",
            "discoverUndocumented": true,
            "strictContract": true
        },
        "presets": ["fast", "full", "aggressive"],
        "exploitDepth": ["low", "med", "high"],
        "logLevels": ["info", "debug"],
        "servers": ["https://x.test", "https://y.test"],
        "help": {
            "baseUrl": "Target API base URL",
            "preset": "Depth profile: fast|full|aggressive"
        }
    })
}
