use sea_orm::entity::prelude::*;

/// Wiki account.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: i16,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_likes_crops::Entity")]
    UserLikesCrops,
    #[sea_orm(has_many = "super::user_likes_meals::Entity")]
    UserLikesMeals,
}

impl Related<super::user_likes_crops::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLikesCrops.def()
    }
}

impl Related<super::user_likes_meals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLikesMeals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
