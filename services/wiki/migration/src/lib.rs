pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_crops;
mod m20260301_000003_create_meals;
mod m20260301_000004_create_meal_ingredients;
mod m20260301_000005_create_user_likes_crops;
mod m20260301_000006_create_user_likes_meals;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_crops::Migration),
            Box::new(m20260301_000003_create_meals::Migration),
            Box::new(m20260301_000004_create_meal_ingredients::Migration),
            Box::new(m20260301_000005_create_user_likes_crops::Migration),
            Box::new(m20260301_000006_create_user_likes_meals::Migration),
        ]
    }
}
