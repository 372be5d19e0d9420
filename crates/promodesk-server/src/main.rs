mod api;
mod middleware;

use std::sync::Arc;

use promodesk_core::{AppConfig, Environment, Fixtures, SettingsStoreKind};
use promodesk_db::{
    DocumentStore, MemoryDocumentStore, PgDocumentStore, Repositories, UnavailableDocumentStore,
};
use promodesk_genai::{GeminiClient, TextGenerator};
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = promodesk_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let fixtures = promodesk_core::load_fixtures_or_builtin(config.fixtures_path.as_deref())?;

    let pool = match config.database_url.as_deref() {
        Some(_) => {
            let pool = promodesk_db::connect_pool_from_config(&config).await?;
            let applied = promodesk_db::run_migrations(&pool).await?;
            tracing::info!(applied, "database migrations complete");
            Some(pool)
        }
        None => None,
    };

    let repos = match pool.as_ref() {
        Some(pool) => Repositories::postgres(pool),
        None => {
            tracing::info!("DATABASE_URL not set; serving in-memory collections seeded from fixtures");
            Repositories::in_memory(&fixtures)
        }
    };
    let documents = build_document_store(&config, pool.as_ref(), &fixtures).await?;

    let generator: Option<Arc<dyn TextGenerator>> = match GeminiClient::from_app_config(&config)? {
        Some(client) => {
            tracing::info!(model = client.model(), "text generation enabled");
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("GENAI_API_KEY not set; generation endpoints will answer 503");
            None
        }
    };

    let auth = AuthState::new(
        &config.api_keys,
        matches!(config.env, Environment::Development),
    )?;
    let state = AppState {
        repos,
        documents,
        generator,
        pool,
        page_size: config.page_size,
    };
    let app = build_app(state, auth, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "promodesk-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn build_document_store(
    config: &AppConfig,
    pool: Option<&PgPool>,
    fixtures: &Fixtures,
) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.settings_store {
        SettingsStoreKind::Postgres => {
            let Some(pool) = pool else {
                anyhow::bail!("the postgres settings store requires DATABASE_URL");
            };
            Arc::new(PgDocumentStore::new(pool.clone()))
        }
        SettingsStoreKind::Memory => {
            let store = MemoryDocumentStore::new();
            promodesk_db::save_settings(&store, &fixtures.settings).await?;
            Arc::new(store)
        }
        SettingsStoreKind::Unavailable => {
            tracing::warn!("settings store unavailable; settings routes will answer 503");
            Arc::new(UnavailableDocumentStore)
        }
    };
    tracing::info!(store = %config.settings_store, "settings store ready");
    Ok(store)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
