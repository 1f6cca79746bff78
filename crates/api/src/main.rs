use std::sync::Arc;

use hrportal_auth::{AuthEngine, LatencyPolicy, NoLatency, SimulatedLatency};
use hrportal_session::{FileSessionStore, InMemorySessionStore, SessionStore};

#[tokio::main]
async fn main() {
    hrportal_observability::init();

    let store: Arc<dyn SessionStore> = match std::env::var("HRPORTAL_SESSION_FILE") {
        Ok(path) => {
            tracing::info!(%path, "using file-backed session store");
            Arc::new(FileSessionStore::new(path))
        }
        Err(_) => {
            tracing::warn!("HRPORTAL_SESSION_FILE not set; sessions will not survive restarts");
            InMemorySessionStore::arc()
        }
    };

    let latency: Arc<dyn LatencyPolicy> = if std::env::var("HRPORTAL_FAST").is_ok() {
        Arc::new(NoLatency)
    } else {
        Arc::new(SimulatedLatency)
    };

    let engine = Arc::new(AuthEngine::new(store.clone(), latency));
    engine
        .bootstrap()
        .expect("failed to load the persisted session");

    let app = hrportal_api::app::build_app(engine, store);

    let addr = std::env::var("HRPORTAL_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
