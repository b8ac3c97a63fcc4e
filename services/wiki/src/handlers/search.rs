use axum::{
    Json,
    extract::{RawQuery, State},
};
use serde::{Deserialize, Serialize};

use delight_domain::catalog::{SearchScope, SearchSortBy};

use crate::error::WikiServiceError;
use crate::handlers::parse_query;
use crate::handlers::view::CatalogItemView;
use crate::state::AppState;
use crate::usecase::search::{SearchInput, SearchUseCase};

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub search_type: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub keyword: String,
    pub search_type: SearchScope,
    pub sort_by: SearchSortBy,
    pub results: Vec<CatalogItemView>,
}

// ── GET /search ──────────────────────────────────────────────────────────────

/// Unknown `search-type` and `sort-by` values fall back to `all` and `name`.
pub async fn search(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<SearchResponse>, WikiServiceError> {
    let query: SearchQuery = parse_query(raw_query)?;
    let keyword = query
        .keyword
        .map(|k| k.trim().to_owned())
        .filter(|k| !k.is_empty())
        .ok_or(WikiServiceError::MissingData)?;
    let scope = SearchScope::parse_lenient(query.search_type.as_deref());
    let sort = SearchSortBy::parse_lenient(query.sort_by.as_deref());

    let usecase = SearchUseCase {
        crops: state.crop_repo(),
        meals: state.meal_repo(),
        likes: state.like_repo(),
    };
    let items = usecase
        .execute(SearchInput {
            keyword: keyword.clone(),
            scope,
            sort,
        })
        .await?;

    Ok(Json(SearchResponse {
        keyword,
        search_type: scope,
        sort_by: sort,
        results: items.into_iter().map(CatalogItemView::from).collect(),
    }))
}
