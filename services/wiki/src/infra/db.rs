use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, FromQueryResult, IntoActiveModel as _, JoinType,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, SqlErr,
    TransactionError, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use delight_core::sea_ext::FilterContainsAny;
use delight_domain::catalog::{EntityKind, EntityRef, SearchSortBy};
use delight_domain::pagination::{Page, PageRequest};
use delight_domain::user::UserRole;
use delight_wiki_schema::{crops, meal_ingredients, meals, user_likes_crops, user_likes_meals, users};

use crate::domain::repository::{CropRepository, LikeRepository, MealRepository, UserRepository};
use crate::domain::types::{
    Crop, CropDraft, Ingredient, IngredientDraft, Meal, MealDraft, Ranked, User, UserChanges,
};
use crate::error::WikiServiceError;

const LIKES_COUNT: &str = "likes_count";

// ── Store error mapping ──────────────────────────────────────────────────────

fn user_write_error(err: DbErr, context: &'static str) -> WikiServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) if message.contains("email") => {
            WikiServiceError::EmailTaken
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => WikiServiceError::UsernameTaken,
        _ => WikiServiceError::Internal(anyhow::Error::new(err).context(context)),
    }
}

fn catalog_write_error(err: DbErr, context: &'static str) -> WikiServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) if message.contains("meal_ingredients") => {
            WikiServiceError::InvalidValue("ingredient")
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => WikiServiceError::NameTaken,
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            WikiServiceError::InvalidValue("ingredient")
        }
        _ => WikiServiceError::Internal(anyhow::Error::new(err).context(context)),
    }
}

fn catalog_txn_error(err: TransactionError<DbErr>, context: &'static str) -> WikiServiceError {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => {
            catalog_write_error(e, context)
        }
    }
}

// The target row vanished between the existence check and the insert.
fn like_toggle_error(err: TransactionError<DbErr>, kind: EntityKind) -> WikiServiceError {
    let err = match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => e,
    };
    match (err.sql_err(), kind) {
        (Some(SqlErr::ForeignKeyConstraintViolation(_)), EntityKind::Crop) => {
            WikiServiceError::CropNotFound
        }
        (Some(SqlErr::ForeignKeyConstraintViolation(_)), EntityKind::Meal) => {
            WikiServiceError::MealNotFound
        }
        _ => WikiServiceError::Internal(anyhow::Error::new(err).context("toggle like")),
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl DbUserRepository {
    async fn taken(
        &self,
        column: users::Column,
        value: &str,
        except: Option<Uuid>,
    ) -> Result<bool, WikiServiceError> {
        let mut query = users::Entity::find().filter(column.eq(value));
        if let Some(id) = except {
            query = query.filter(users::Column::Id.ne(id));
        }
        let count = query
            .count(&self.db)
            .await
            .context("count users holding value")?;
        Ok(count > 0)
    }
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WikiServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, WikiServiceError> {
        let model = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(login))
                    .add(users::Column::Email.eq(login)),
            )
            .order_by_asc(users::Column::Id)
            .one(&self.db)
            .await
            .context("find user by login")?;
        Ok(model.map(user_from_model))
    }

    async fn username_taken(
        &self,
        username: &str,
        except: Option<Uuid>,
    ) -> Result<bool, WikiServiceError> {
        self.taken(users::Column::Username, username, except).await
    }

    async fn email_taken(
        &self,
        email: &str,
        except: Option<Uuid>,
    ) -> Result<bool, WikiServiceError> {
        self.taken(users::Column::Email, email, except).await
    }

    async fn create(&self, user: &User) -> Result<(), WikiServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(i16::from(user.role.as_u8())),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| user_write_error(e, "create user"))?;
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<(), WikiServiceError> {
        if changes.is_empty() {
            return match self.find_by_id(id).await? {
                Some(_) => Ok(()),
                None => Err(WikiServiceError::UserNotFound),
            };
        }
        let mut update = users::Entity::update_many().filter(users::Column::Id.eq(id));
        if let Some(username) = &changes.username {
            update = update.col_expr(users::Column::Username, Expr::value(username.clone()));
        }
        if let Some(email) = &changes.email {
            update = update.col_expr(users::Column::Email, Expr::value(email.clone()));
        }
        if let Some(hash) = &changes.password_hash {
            update = update.col_expr(users::Column::PasswordHash, Expr::value(hash.clone()));
        }
        if let Some(role) = changes.role {
            update = update.col_expr(users::Column::Role, Expr::value(i16::from(role.as_u8())));
        }
        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| user_write_error(e, "update user"))?;
        if result.rows_affected == 0 {
            return Err(WikiServiceError::UserNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, WikiServiceError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }

    async fn list(
        &self,
        query: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<User>, WikiServiceError> {
        let mut select = users::Entity::find();
        if let Some(needle) = query.filter(|q| !q.is_empty()) {
            select =
                select.filter_contains_any(&[users::Column::Username, users::Column::Email], needle);
        }
        let total = select.clone().count(&self.db).await.context("count users")?;
        let models = select
            .order_by_asc(users::Column::Username)
            .order_by_asc(users::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(Page::new(
            models.into_iter().map(user_from_model).collect(),
            page,
            total,
        ))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        role: u8::try_from(model.role)
            .ok()
            .and_then(UserRole::from_u8)
            .unwrap_or_default(),
        created_at: model.created_at,
    }
}

// ── Crop repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCropRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct CropLikesRow {
    id: i32,
    name: String,
    description: Option<String>,
    image_url: Option<String>,
    hunger_points: i32,
    created_at: DateTime<Utc>,
    likes_count: i64,
}

impl From<CropLikesRow> for Ranked<Crop> {
    fn from(row: CropLikesRow) -> Self {
        Ranked {
            item: Crop {
                id: row.id,
                name: row.name,
                description: row.description,
                image_url: row.image_url,
                hunger_points: row.hunger_points,
                created_at: row.created_at,
            },
            likes_count: u64::try_from(row.likes_count).unwrap_or_default(),
        }
    }
}

/// Left-join like rows and order by their count, most liked first, id
/// ascending on ties. Crops without likes count as zero.
fn crops_by_likes(select: Select<crops::Entity>) -> Select<crops::Entity> {
    let likes = Expr::col((user_likes_crops::Entity, user_likes_crops::Column::UserId)).count();
    select
        .column_as(likes.clone(), LIKES_COUNT)
        .join(JoinType::LeftJoin, crops::Relation::UserLikesCrops.def())
        .group_by(crops::Column::Id)
        .order_by(likes, Order::Desc)
        .order_by_asc(crops::Column::Id)
}

impl CropRepository for DbCropRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Crop>, WikiServiceError> {
        let model = crops::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find crop by id")?;
        Ok(model.map(crop_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Crop>, WikiServiceError> {
        let model = crops::Entity::find()
            .filter(crops::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find crop by name")?;
        Ok(model.map(crop_from_model))
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Crop>, WikiServiceError> {
        let total = crops::Entity::find()
            .count(&self.db)
            .await
            .context("count crops")?;
        let models = crops::Entity::find()
            .order_by_asc(crops::Column::Name)
            .order_by_asc(crops::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list crops")?;
        Ok(Page::new(
            models.into_iter().map(crop_from_model).collect(),
            page,
            total,
        ))
    }

    async fn search(
        &self,
        keyword: &str,
        sort: SearchSortBy,
    ) -> Result<Vec<Crop>, WikiServiceError> {
        let matching = crops::Entity::find().filter_contains_any(
            &[crops::Column::Name, crops::Column::Description],
            keyword,
        );
        let crops = match sort {
            SearchSortBy::Name => matching
                .order_by_asc(crops::Column::Name)
                .order_by_asc(crops::Column::Id)
                .all(&self.db)
                .await
                .context("search crops by name")?
                .into_iter()
                .map(crop_from_model)
                .collect(),
            SearchSortBy::Hunger => matching
                .order_by_desc(crops::Column::HungerPoints)
                .order_by_asc(crops::Column::Id)
                .all(&self.db)
                .await
                .context("search crops by hunger")?
                .into_iter()
                .map(crop_from_model)
                .collect(),
            SearchSortBy::Likes => crops_by_likes(matching)
                .into_model::<CropLikesRow>()
                .all(&self.db)
                .await
                .context("search crops by likes")?
                .into_iter()
                .map(|row| Ranked::from(row).item)
                .collect(),
        };
        Ok(crops)
    }

    async fn top_liked(&self, limit: u64) -> Result<Vec<Ranked<Crop>>, WikiServiceError> {
        let rows = crops_by_likes(crops::Entity::find())
            .limit(limit)
            .into_model::<CropLikesRow>()
            .all(&self.db)
            .await
            .context("rank crops by likes")?;
        Ok(rows.into_iter().map(Ranked::from).collect())
    }

    async fn meals_using(&self, crop_id: i32) -> Result<Vec<Meal>, WikiServiceError> {
        let models = meals::Entity::find()
            .join(JoinType::InnerJoin, meals::Relation::MealIngredients.def())
            .filter(meal_ingredients::Column::CropId.eq(crop_id))
            .order_by_asc(meals::Column::Name)
            .order_by_asc(meals::Column::Id)
            .all(&self.db)
            .await
            .context("list meals using crop")?;
        Ok(models.into_iter().map(meal_from_model).collect())
    }

    async fn create(&self, draft: &CropDraft) -> Result<Crop, WikiServiceError> {
        let model = crops::ActiveModel {
            name: Set(draft.name.clone()),
            description: Set(draft.description.clone()),
            image_url: Set(draft.image_url.clone()),
            hunger_points: Set(draft.hunger_points),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| catalog_write_error(e, "create crop"))?;
        Ok(crop_from_model(model))
    }

    async fn update(&self, id: i32, draft: &CropDraft) -> Result<Crop, WikiServiceError> {
        let existing = crops::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find crop for update")?
            .ok_or(WikiServiceError::CropNotFound)?;
        let mut crop = existing.into_active_model();
        crop.name = Set(draft.name.clone());
        crop.description = Set(draft.description.clone());
        crop.image_url = Set(draft.image_url.clone());
        crop.hunger_points = Set(draft.hunger_points);
        let model = crop
            .update(&self.db)
            .await
            .map_err(|e| catalog_write_error(e, "update crop"))?;
        Ok(crop_from_model(model))
    }

    async fn delete(&self, id: i32) -> Result<bool, WikiServiceError> {
        let result = crops::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete crop")?;
        Ok(result.rows_affected > 0)
    }
}

fn crop_from_model(model: crops::Model) -> Crop {
    Crop {
        id: model.id,
        name: model.name,
        description: model.description,
        image_url: model.image_url,
        hunger_points: model.hunger_points,
        created_at: model.created_at,
    }
}

// ── Meal repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMealRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct MealLikesRow {
    id: i32,
    name: String,
    description: Option<String>,
    image_url: Option<String>,
    hunger_restored: i32,
    saturation: f64,
    created_at: DateTime<Utc>,
    likes_count: i64,
}

impl From<MealLikesRow> for Ranked<Meal> {
    fn from(row: MealLikesRow) -> Self {
        Ranked {
            item: Meal {
                id: row.id,
                name: row.name,
                description: row.description,
                image_url: row.image_url,
                hunger_restored: row.hunger_restored,
                saturation: row.saturation,
                created_at: row.created_at,
            },
            likes_count: u64::try_from(row.likes_count).unwrap_or_default(),
        }
    }
}

/// Meal counterpart of [`crops_by_likes`].
fn meals_by_likes(select: Select<meals::Entity>) -> Select<meals::Entity> {
    let likes = Expr::col((user_likes_meals::Entity, user_likes_meals::Column::UserId)).count();
    select
        .column_as(likes.clone(), LIKES_COUNT)
        .join(JoinType::LeftJoin, meals::Relation::UserLikesMeals.def())
        .group_by(meals::Column::Id)
        .order_by(likes, Order::Desc)
        .order_by_asc(meals::Column::Id)
}

impl MealRepository for DbMealRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Meal>, WikiServiceError> {
        let model = meals::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find meal by id")?;
        Ok(model.map(meal_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Meal>, WikiServiceError> {
        let model = meals::Entity::find()
            .filter(meals::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find meal by name")?;
        Ok(model.map(meal_from_model))
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Meal>, WikiServiceError> {
        let total = meals::Entity::find()
            .count(&self.db)
            .await
            .context("count meals")?;
        let models = meals::Entity::find()
            .order_by_asc(meals::Column::Name)
            .order_by_asc(meals::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list meals")?;
        Ok(Page::new(
            models.into_iter().map(meal_from_model).collect(),
            page,
            total,
        ))
    }

    async fn search(
        &self,
        keyword: &str,
        sort: SearchSortBy,
    ) -> Result<Vec<Meal>, WikiServiceError> {
        let matching = meals::Entity::find().filter_contains_any(
            &[meals::Column::Name, meals::Column::Description],
            keyword,
        );
        let meals = match sort {
            SearchSortBy::Name => matching
                .order_by_asc(meals::Column::Name)
                .order_by_asc(meals::Column::Id)
                .all(&self.db)
                .await
                .context("search meals by name")?
                .into_iter()
                .map(meal_from_model)
                .collect(),
            SearchSortBy::Hunger => matching
                .order_by_desc(meals::Column::HungerRestored)
                .order_by_asc(meals::Column::Id)
                .all(&self.db)
                .await
                .context("search meals by hunger")?
                .into_iter()
                .map(meal_from_model)
                .collect(),
            SearchSortBy::Likes => meals_by_likes(matching)
                .into_model::<MealLikesRow>()
                .all(&self.db)
                .await
                .context("search meals by likes")?
                .into_iter()
                .map(|row| Ranked::from(row).item)
                .collect(),
        };
        Ok(meals)
    }

    async fn top_liked(&self, limit: u64) -> Result<Vec<Ranked<Meal>>, WikiServiceError> {
        let rows = meals_by_likes(meals::Entity::find())
            .limit(limit)
            .into_model::<MealLikesRow>()
            .all(&self.db)
            .await
            .context("rank meals by likes")?;
        Ok(rows.into_iter().map(Ranked::from).collect())
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Meal>, WikiServiceError> {
        let models = meals::Entity::find()
            .order_by_desc(meals::Column::CreatedAt)
            .order_by_desc(meals::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list recent meals")?;
        Ok(models.into_iter().map(meal_from_model).collect())
    }

    async fn ingredients(&self, meal_id: i32) -> Result<Vec<Ingredient>, WikiServiceError> {
        let rows = meal_ingredients::Entity::find()
            .filter(meal_ingredients::Column::MealId.eq(meal_id))
            .find_also_related(crops::Entity)
            .order_by_asc(crops::Column::Name)
            .all(&self.db)
            .await
            .context("list meal ingredients")?;
        Ok(rows
            .into_iter()
            .filter_map(|(link, crop)| {
                crop.map(|crop| Ingredient {
                    crop: crop_from_model(crop),
                    quantity: link.quantity,
                })
            })
            .collect())
    }

    async fn create(&self, draft: &MealDraft) -> Result<Meal, WikiServiceError> {
        let model = self
            .db
            .transaction::<_, meals::Model, DbErr>(|txn| {
                let draft = draft.clone();
                Box::pin(async move {
                    let meal = meals::ActiveModel {
                        name: Set(draft.name),
                        description: Set(draft.description),
                        image_url: Set(draft.image_url),
                        hunger_restored: Set(draft.hunger_restored),
                        saturation: Set(draft.saturation),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    if let Some(ingredients) = &draft.ingredients {
                        insert_ingredients(txn, meal.id, ingredients).await?;
                    }
                    Ok(meal)
                })
            })
            .await
            .map_err(|e| catalog_txn_error(e, "create meal"))?;
        Ok(meal_from_model(model))
    }

    async fn update(&self, id: i32, draft: &MealDraft) -> Result<Meal, WikiServiceError> {
        let model = self
            .db
            .transaction::<_, Option<meals::Model>, DbErr>(|txn| {
                let draft = draft.clone();
                Box::pin(async move {
                    let Some(existing) = meals::Entity::find_by_id(id).one(txn).await? else {
                        return Ok(None);
                    };
                    let mut meal = existing.into_active_model();
                    meal.name = Set(draft.name);
                    meal.description = Set(draft.description);
                    meal.image_url = Set(draft.image_url);
                    meal.hunger_restored = Set(draft.hunger_restored);
                    meal.saturation = Set(draft.saturation);
                    let meal = meal.update(txn).await?;
                    if let Some(ingredients) = &draft.ingredients {
                        meal_ingredients::Entity::delete_many()
                            .filter(meal_ingredients::Column::MealId.eq(id))
                            .exec(txn)
                            .await?;
                        insert_ingredients(txn, id, ingredients).await?;
                    }
                    Ok(Some(meal))
                })
            })
            .await
            .map_err(|e| catalog_txn_error(e, "update meal"))?
            .ok_or(WikiServiceError::MealNotFound)?;
        Ok(meal_from_model(model))
    }

    async fn delete(&self, id: i32) -> Result<bool, WikiServiceError> {
        let result = meals::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete meal")?;
        Ok(result.rows_affected > 0)
    }
}

async fn insert_ingredients(
    txn: &DatabaseTransaction,
    meal_id: i32,
    ingredients: &[IngredientDraft],
) -> Result<(), DbErr> {
    for ingredient in ingredients {
        meal_ingredients::ActiveModel {
            meal_id: Set(meal_id),
            crop_id: Set(ingredient.crop_id),
            quantity: Set(ingredient.quantity),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

fn meal_from_model(model: meals::Model) -> Meal {
    Meal {
        id: model.id,
        name: model.name,
        description: model.description,
        image_url: model.image_url,
        hunger_restored: model.hunger_restored,
        saturation: model.saturation,
        created_at: model.created_at,
    }
}

// ── Like repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLikeRepository {
    pub db: DatabaseConnection,
}

impl LikeRepository for DbLikeRepository {
    async fn toggle(&self, user_id: Uuid, target: EntityRef) -> Result<bool, WikiServiceError> {
        let liked = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    match target.kind {
                        EntityKind::Crop => toggle_crop_like(txn, user_id, target.id).await,
                        EntityKind::Meal => toggle_meal_like(txn, user_id, target.id).await,
                    }
                })
            })
            .await
            .map_err(|e| like_toggle_error(e, target.kind))?;
        Ok(liked)
    }

    async fn count(&self, target: EntityRef) -> Result<u64, WikiServiceError> {
        let count = match target.kind {
            EntityKind::Crop => {
                user_likes_crops::Entity::find()
                    .filter(user_likes_crops::Column::CropId.eq(target.id))
                    .count(&self.db)
                    .await
            }
            EntityKind::Meal => {
                user_likes_meals::Entity::find()
                    .filter(user_likes_meals::Column::MealId.eq(target.id))
                    .count(&self.db)
                    .await
            }
        }
        .context("count likes")?;
        Ok(count)
    }

    async fn is_liked(&self, user_id: Uuid, target: EntityRef) -> Result<bool, WikiServiceError> {
        let liked = match target.kind {
            EntityKind::Crop => user_likes_crops::Entity::find_by_id((user_id, target.id))
                .one(&self.db)
                .await
                .map(|row| row.is_some()),
            EntityKind::Meal => user_likes_meals::Entity::find_by_id((user_id, target.id))
                .one(&self.db)
                .await
                .map(|row| row.is_some()),
        }
        .context("check like")?;
        Ok(liked)
    }

    async fn any(&self, kind: EntityKind) -> Result<bool, WikiServiceError> {
        let any = match kind {
            EntityKind::Crop => user_likes_crops::Entity::find()
                .one(&self.db)
                .await
                .map(|row| row.is_some()),
            EntityKind::Meal => user_likes_meals::Entity::find()
                .one(&self.db)
                .await
                .map(|row| row.is_some()),
        }
        .context("check any likes")?;
        Ok(any)
    }

    async fn liked_crops(&self, user_id: Uuid) -> Result<Vec<Crop>, WikiServiceError> {
        let models = crops::Entity::find()
            .join(JoinType::InnerJoin, crops::Relation::UserLikesCrops.def())
            .filter(user_likes_crops::Column::UserId.eq(user_id))
            .order_by_desc(user_likes_crops::Column::LikedAt)
            .order_by_asc(crops::Column::Id)
            .all(&self.db)
            .await
            .context("list liked crops")?;
        Ok(models.into_iter().map(crop_from_model).collect())
    }

    async fn liked_meals(&self, user_id: Uuid) -> Result<Vec<Meal>, WikiServiceError> {
        let models = meals::Entity::find()
            .join(JoinType::InnerJoin, meals::Relation::UserLikesMeals.def())
            .filter(user_likes_meals::Column::UserId.eq(user_id))
            .order_by_desc(user_likes_meals::Column::LikedAt)
            .order_by_asc(meals::Column::Id)
            .all(&self.db)
            .await
            .context("list liked meals")?;
        Ok(models.into_iter().map(meal_from_model).collect())
    }
}

// Delete the pair if present; otherwise insert it. A concurrent insert of the
// same pair hits the primary key and is ignored.
async fn toggle_crop_like(
    txn: &DatabaseTransaction,
    user_id: Uuid,
    crop_id: i32,
) -> Result<bool, DbErr> {
    let removed = user_likes_crops::Entity::delete_many()
        .filter(user_likes_crops::Column::UserId.eq(user_id))
        .filter(user_likes_crops::Column::CropId.eq(crop_id))
        .exec(txn)
        .await?;
    if removed.rows_affected > 0 {
        return Ok(false);
    }
    user_likes_crops::Entity::insert(user_likes_crops::ActiveModel {
        user_id: Set(user_id),
        crop_id: Set(crop_id),
        liked_at: Set(Utc::now()),
    })
    .on_conflict(
        OnConflict::columns([
            user_likes_crops::Column::UserId,
            user_likes_crops::Column::CropId,
        ])
        .do_nothing()
        .to_owned(),
    )
    .exec_without_returning(txn)
    .await?;
    Ok(true)
}

async fn toggle_meal_like(
    txn: &DatabaseTransaction,
    user_id: Uuid,
    meal_id: i32,
) -> Result<bool, DbErr> {
    let removed = user_likes_meals::Entity::delete_many()
        .filter(user_likes_meals::Column::UserId.eq(user_id))
        .filter(user_likes_meals::Column::MealId.eq(meal_id))
        .exec(txn)
        .await?;
    if removed.rows_affected > 0 {
        return Ok(false);
    }
    user_likes_meals::Entity::insert(user_likes_meals::ActiveModel {
        user_id: Set(user_id),
        meal_id: Set(meal_id),
        liked_at: Set(Utc::now()),
    })
    .on_conflict(
        OnConflict::columns([
            user_likes_meals::Column::UserId,
            user_likes_meals::Column::MealId,
        ])
        .do_nothing()
        .to_owned(),
    )
    .exec_without_returning(txn)
    .await?;
    Ok(true)
}
