use dotenvy::dotenv;
use tracing::info;

use waitlist_api::infra::{
    InfraError,
    app::create_app,
    config::AppConfig,
    setup::{connect_store, init_app_state, init_tracing},
};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(config.log_file.as_deref());

    let app_state = init_app_state(config).await?;

    let bind_addr = app_state.config.bind_addr;

    // Connect in the background; gated routes answer 503 until this finishes.
    tokio::spawn(connect_store(
        app_state.config.clone(),
        app_state.store_gate.clone(),
    ));

    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(InfraError::TcpBind)?;

    info!("Server running on {}", &listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(InfraError::Server)?;

    Ok(())
}
