use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserLikesMeals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserLikesMeals::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserLikesMeals::MealId).integer().not_null())
                    .col(
                        ColumnDef::new(UserLikesMeals::LikedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserLikesMeals::UserId)
                            .col(UserLikesMeals::MealId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserLikesMeals::Table, UserLikesMeals::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserLikesMeals::Table, UserLikesMeals::MealId)
                            .to(Meals::Table, Meals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(UserLikesMeals::Table)
                    .col(UserLikesMeals::MealId)
                    .name("idx_user_likes_meals_meal_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserLikesMeals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserLikesMeals {
    Table,
    UserId,
    MealId,
    LikedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Meals {
    Table,
    Id,
}
