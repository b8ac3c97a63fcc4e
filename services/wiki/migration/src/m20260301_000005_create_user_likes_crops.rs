use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserLikesCrops::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserLikesCrops::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserLikesCrops::CropId).integer().not_null())
                    .col(
                        ColumnDef::new(UserLikesCrops::LikedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserLikesCrops::UserId)
                            .col(UserLikesCrops::CropId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserLikesCrops::Table, UserLikesCrops::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserLikesCrops::Table, UserLikesCrops::CropId)
                            .to(Crops::Table, Crops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(UserLikesCrops::Table)
                    .col(UserLikesCrops::CropId)
                    .name("idx_user_likes_crops_crop_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserLikesCrops::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserLikesCrops {
    Table,
    UserId,
    CropId,
    LikedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Crops {
    Table,
    Id,
}
