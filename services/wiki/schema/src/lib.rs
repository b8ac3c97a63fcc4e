pub mod crops;
pub mod meal_ingredients;
pub mod meals;
pub mod user_likes_crops;
pub mod user_likes_meals;
pub mod users;
