use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shareit::config::GatewayConfig;
use shareit::gateway::{self, BackendClient, Gateway};
use shareit::server;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shareit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let config = GatewayConfig::from_env();

    let client = BackendClient::new(config.server_url.clone()).expect("Failed to build HTTP client");
    tracing::info!("Forwarding to backend at {}", client.base_url());

    let app = gateway::gateway_router(Gateway::new(client));

    server::serve(app, config.port, "ShareIt gateway")
        .await
        .expect("Failed to start gateway");
}
