// Fleet Reconciliation - Web Server
// One POST endpoint: analyze a wallet's fleet against its ship parts

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use fleet_recon::{reconcile_ownership, ReconciliationReport, SnapshotProvider, StderrSink};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
struct AppState {
    provider: Arc<SnapshotProvider>,
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    fn err(message: &str) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(message.to_string()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    #[serde(default)]
    wallet_address: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/analyze-fleet - Reconcile one wallet's ships against its parts
async fn analyze_fleet(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let wallet = request.wallet_address.trim().to_string();

    if wallet.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ReconciliationReport>::err(
                "Wallet address is required",
            )),
        )
            .into_response();
    }

    println!("Analyzing fleet for wallet: {}", wallet);

    match reconcile_ownership(state.provider.as_ref(), &wallet, &StderrSink).await {
        Ok(report) => (StatusCode::OK, Json(ApiResponse::ok(report))).into_response(),
        Err(e) => {
            eprintln!("Error analyzing fleet for {}: {:#}", wallet, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ReconciliationReport>::err(&format!(
                    "Error analyzing fleet: {:#}",
                    e
                ))),
            )
                .into_response()
        }
    }
}

fn app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/analyze-fleet", post(analyze_fleet))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Fleet Reconciliation - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let snapshot_path =
        std::env::var("SNAPSHOT_PATH").unwrap_or_else(|_| "snapshot.json".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());

    let path = std::path::Path::new(&snapshot_path);
    if !path.exists() {
        eprintln!("❌ Snapshot not found at {:?}", path);
        eprintln!("   Set SNAPSHOT_PATH to a holdings snapshot file.");
        std::process::exit(1);
    }

    let provider = SnapshotProvider::load(path).expect("Failed to load snapshot");
    println!("✓ Snapshot loaded: {:?} ({} wallets)", path, provider.wallet_count());

    let state = AppState {
        provider: Arc::new(provider),
    };

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:{}", port);
    println!("   POST http://localhost:{}/api/analyze-fleet", port);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app(state))
        .await
        .expect("Failed to start server");
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    const SNAPSHOT: &str = r#"{
        "wallet-1": {
            "inventory": [
                { "mint": "m1", "name": "Pearce X4", "symbol": "PX4", "quantity": 2, "item_type": "ship" },
                { "mint": "m2", "name": "Pearce X4 Ship Part", "symbol": "PX4SP", "quantity": 3, "item_type": "ship parts" }
            ]
        }
    }"#;

    fn test_app() -> Router {
        let provider = SnapshotProvider::from_json(SNAPSHOT).unwrap();
        app(AppState {
            provider: Arc::new(provider),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_fleet_ok() {
        let response = test_app()
            .oneshot(
                Request::post("/api/analyze-fleet")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"walletAddress":"wallet-1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], serde_json::json!(true));

        let pairs = body["result"]["outcome"]["matching_pairs"].as_array().unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0]["ship_quantity"], serde_json::json!(2));
        assert_eq!(pairs[0]["part_quantity"], serde_json::json!(3));
        assert_eq!(pairs[0]["difference"], serde_json::json!(1));
    }

    #[tokio::test]
    async fn test_missing_wallet_is_bad_request() {
        let response = test_app()
            .oneshot(
                Request::post("/api/analyze-fleet")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], serde_json::json!(false));
        assert!(body["error"].as_str().unwrap().contains("required"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
