mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::chat::ChatStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");
    let storage_path = std::env::var("STORAGE_PATH").unwrap_or_else(|_| "storage.json".into());

    let store = ChatStore::new(&storage_path);
    store
        .ensure_initialized()
        .await
        .expect("storage init failed");

    // Initialize LLM client (non-fatal: generation disabled if config missing).
    let llm = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client) as Arc<dyn llm::LlmGenerate>)
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured — generation disabled");
            None
        }
    };

    let state = state::AppState::new(store, llm);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "tutorchat listening");
    axum::serve(listener, app).await.expect("server failed");
}
