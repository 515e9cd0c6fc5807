/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → verifier 生成 → Router 組み立て
 * - Middleware の適用 (access log / request id / bearer gate)
 * - axum::serve() で起動
 */
use std::{net::SocketAddr, panic, process};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::build_token_verifier;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,keycloak_gate=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting keycloak gate in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let verifier = build_token_verifier(&config).context("failed to load AUTH public key")?;
    let state = AppState::new(verifier);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let v1 = middleware::auth::apply(api::v1::routes(), state.verifier.clone());

    let router = Router::new()
        .route("/health", get(api::v1::handlers::health::health))
        .nest("/api/v1", v1)
        .with_state(state);

    middleware::http::apply(
        router,
        middleware::http::AccessLog {
            proxy_header: config.proxy_header.clone(),
        },
    )
}
