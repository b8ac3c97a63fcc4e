use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "meals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_restored: i32,
    #[sea_orm(column_type = "Double")]
    pub saturation: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_likes_meals::Entity")]
    UserLikesMeals,
    #[sea_orm(has_many = "super::meal_ingredients::Entity")]
    MealIngredients,
}

impl Related<super::user_likes_meals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLikesMeals.def()
    }
}

impl Related<super::meal_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealIngredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
