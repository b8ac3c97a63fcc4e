use sea_orm::entity::prelude::*;

/// Crop used by a meal, with the amount the recipe calls for.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "meal_ingredients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub meal_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub crop_id: i32,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::meals::Entity",
        from = "Column::MealId",
        to = "super::meals::Column::Id"
    )]
    Meal,
    #[sea_orm(
        belongs_to = "super::crops::Entity",
        from = "Column::CropId",
        to = "super::crops::Column::Id"
    )]
    Crop,
}

impl Related<super::meals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meal.def()
    }
}

impl Related<super::crops::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Crop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
