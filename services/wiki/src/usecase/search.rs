use std::collections::HashMap;

use delight_domain::catalog::{EntityRef, SearchScope, SearchSortBy};

use crate::domain::repository::{CropRepository, LikeRepository, MealRepository};
use crate::domain::types::{CatalogItem, sort_catalog_items};
use crate::error::WikiServiceError;

pub struct SearchInput {
    pub keyword: String,
    pub scope: SearchScope,
    pub sort: SearchSortBy,
}

pub struct SearchUseCase<C, M, L>
where
    C: CropRepository,
    M: MealRepository,
    L: LikeRepository,
{
    pub crops: C,
    pub meals: M,
    pub likes: L,
}

impl<C, M, L> SearchUseCase<C, M, L>
where
    C: CropRepository,
    M: MealRepository,
    L: LikeRepository,
{
    /// Single-type scopes are ordered by the store; `All` merges crops and
    /// meals and orders them here.
    pub async fn execute(&self, input: SearchInput) -> Result<Vec<CatalogItem>, WikiServiceError> {
        let SearchInput {
            keyword,
            scope,
            sort,
        } = input;

        match scope {
            SearchScope::Crops => Ok(self
                .crops
                .search(&keyword, sort)
                .await?
                .into_iter()
                .map(CatalogItem::Crop)
                .collect()),
            SearchScope::Meals => Ok(self
                .meals
                .search(&keyword, sort)
                .await?
                .into_iter()
                .map(CatalogItem::Meal)
                .collect()),
            SearchScope::All => {
                let mut items: Vec<CatalogItem> = self
                    .crops
                    .search(&keyword, SearchSortBy::Name)
                    .await?
                    .into_iter()
                    .map(CatalogItem::Crop)
                    .chain(
                        self.meals
                            .search(&keyword, SearchSortBy::Name)
                            .await?
                            .into_iter()
                            .map(CatalogItem::Meal),
                    )
                    .collect();

                let mut likes: HashMap<EntityRef, u64> = HashMap::new();
                if sort == SearchSortBy::Likes {
                    for item in &items {
                        let target = item.entity_ref();
                        likes.insert(target, self.likes.count(target).await?);
                    }
                }

                sort_catalog_items(&mut items, sort, &likes);
                Ok(items)
            }
        }
    }
}
