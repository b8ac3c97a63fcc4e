use anyhow::Context;
use sea_orm::Database;
use tracing::info;

use delight_auth_types::cookie::CookieSettings;
use delight_auth_types::identity::SessionKey;
use delight_core::tracing::init_tracing;
use delight_wiki::config::WikiConfig;
use delight_wiki::router::build_router;
use delight_wiki::state::AppState;
use delight_wiki_migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WikiConfig::from_env()?;
    init_tracing(Some(&config.audit_log)).context("failed to open audit log")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    if config.auto_migrate {
        Migrator::up(&db, None)
            .await
            .context("failed to run migrations")?;
        info!("migrations applied");
    }

    let state = AppState {
        db,
        session_key: SessionKey::new(config.jwt_secret),
        cookies: CookieSettings {
            domain: config.cookie_domain,
            secure: config.cookie_secure,
        },
        items_per_page: config.items_per_page,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.wiki_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!("wiki service listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
