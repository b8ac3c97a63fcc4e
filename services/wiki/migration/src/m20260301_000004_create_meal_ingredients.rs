use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MealIngredients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MealIngredients::MealId).integer().not_null())
                    .col(ColumnDef::new(MealIngredients::CropId).integer().not_null())
                    .col(
                        ColumnDef::new(MealIngredients::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .primary_key(
                        Index::create()
                            .col(MealIngredients::MealId)
                            .col(MealIngredients::CropId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MealIngredients::Table, MealIngredients::MealId)
                            .to(Meals::Table, Meals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MealIngredients::Table, MealIngredients::CropId)
                            .to(Crops::Table, Crops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(MealIngredients::Table)
                    .col(MealIngredients::CropId)
                    .name("idx_meal_ingredients_crop_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MealIngredients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MealIngredients {
    Table,
    MealId,
    CropId,
    Quantity,
}

#[derive(Iden)]
enum Meals {
    Table,
    Id,
}

#[derive(Iden)]
enum Crops {
    Table,
    Id,
}
