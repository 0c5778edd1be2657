use resource_library_api::{config, database, routes};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting resource library API in {:?} mode", config.environment);

    // A database that cannot be reached at startup is the one fatal
    // configuration error; everything else degrades per request.
    if let Err(e) = database::manager::connect().await {
        tracing::error!("Error connecting to database: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Database connected successfully");

    let app = routes::app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Resource library API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
