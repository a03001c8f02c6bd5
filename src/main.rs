use axum::{
    Router,
    extract::Extension,
    routing::get,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use timber_catalog::catalog::handlers::{
    handle_category_detail, handle_list_categories, handle_product_detail,
    handle_profile_resolution,
};
use timber_catalog::catalog::store::load_catalog;
use timber_catalog::search::handlers::handle_search;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: Option<SocketAddr> = None;
    let mut data_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--data" => {
                data_path = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let (Some(bind_addr), Some(data_path)) = (bind_addr, data_path) else {
        eprintln!("Usage: {} --bind <addr:port> --data <catalog.json>", args[0]);
        eprintln!("Example: {} --bind 127.0.0.1:8000 --data catalog.json", args[0]);
        std::process::exit(1);
    };

    tracing::info!("Loading catalog from {}", data_path.display());
    let store = Arc::new(load_catalog(&data_path)?);

    let app = Router::new()
        .route("/api/search", get(handle_search))
        .route("/api/categories", get(handle_list_categories))
        .route("/api/cat/:slug", get(handle_category_detail))
        .route("/api/profile/:id", get(handle_profile_resolution))
        .route("/api/product/:id", get(handle_product_detail))
        .layer(Extension(store));

    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
