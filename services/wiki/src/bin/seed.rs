use anyhow::Context;
use sea_orm::Database;

use delight_core::tracing::init_tracing;
use delight_wiki::config::DEFAULT_DATABASE_URL;
use delight_wiki::infra::db::{DbCropRepository, DbMealRepository, DbUserRepository};
use delight_wiki::usecase::seed::{SeedAdmin, SeedUseCase};
use delight_wiki_migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(None)?;
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

    let admin = SeedAdmin {
        username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_owned()),
        email: std::env::var("ADMIN_EMAIL").context("ADMIN_EMAIL must be set")?,
        password: std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?,
    };

    let db = Database::connect(&database_url)
        .await
        .context("failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;

    let usecase = SeedUseCase {
        users: DbUserRepository { db: db.clone() },
        crops: DbCropRepository { db: db.clone() },
        meals: DbMealRepository { db },
    };
    usecase.execute(admin).await?;
    Ok(())
}
