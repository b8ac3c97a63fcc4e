use delight_domain::catalog::EntityRef;
use delight_domain::pagination::PageRequest;
use delight_domain::user::UserRole;
use delight_wiki::error::WikiServiceError;
use delight_wiki::usecase::catalog::{
    GetCropDetailUseCase, GetMealDetailUseCase, ListCropsUseCase,
};
use delight_wiki::usecase::profile::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};
use delight_wiki::usecase::ranking::{GetHomePanelUseCase, GetRankingsUseCase};

use crate::helpers::MockStore;

fn like_n_times(store: &MockStore, target: EntityRef, n: usize) {
    for i in 0..n {
        let user = store.add_user(&format!("fan{}{i}", target), UserRole::Normal);
        store.add_like(user.id, target);
    }
}

// ── Rankings ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_rank_top_meals_by_likes_then_id() {
    let store = MockStore::new();
    for (name, likes) in [("Ham", 5), ("Smoked Ham", 5), ("Fried Rice", 2), ("Cooked Rice", 0)] {
        let meal = store.add_meal(name, 8);
        like_n_times(&store, EntityRef::meal(meal.id), likes);
    }

    let top = GetHomePanelUseCase {
        meals: store.meals(),
        likes: store.likes(),
    }
    .execute()
    .await
    .unwrap();

    let got: Vec<(i32, u64)> = top.iter().map(|r| (r.item.id, r.likes_count)).collect();
    assert_eq!(got, vec![(1, 5), (2, 5), (3, 2)]);
}

#[tokio::test]
async fn should_fall_back_to_recent_meals_without_any_meal_like() {
    let store = MockStore::new();
    let alice = store.add_user("alice", UserRole::Normal);
    let rice = store.add_crop("Rice", 1);
    // Crop likes do not count for the meal panel.
    store.add_like(alice.id, EntityRef::crop(rice.id));
    for name in ["Ham", "Smoked Ham", "Fried Rice", "Cooked Rice"] {
        store.add_meal(name, 8);
    }

    let top = GetHomePanelUseCase {
        meals: store.meals(),
        likes: store.likes(),
    }
    .execute()
    .await
    .unwrap();

    let got: Vec<(i32, u64)> = top.iter().map(|r| (r.item.id, r.likes_count)).collect();
    assert_eq!(got, vec![(4, 0), (3, 0), (2, 0)]);
}

#[tokio::test]
async fn should_cap_rankings_at_ten_including_zero_like_entries() {
    let store = MockStore::new();
    for i in 0..12 {
        store.add_crop(&format!("Crop {i:02}"), 1);
    }
    store.add_meal("Ham", 8);
    like_n_times(&store, EntityRef::crop(12), 1);

    let rankings = GetRankingsUseCase {
        crops: store.crops(),
        meals: store.meals(),
    }
    .execute()
    .await
    .unwrap();

    assert_eq!(rankings.crops.len(), 10);
    assert_eq!(rankings.crops[0].item.id, 12);
    assert_eq!(rankings.crops[1].item.id, 1);
    assert_eq!(rankings.meals.len(), 1);
    assert_eq!(rankings.meals[0].likes_count, 0);
}

// ── Details ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_show_crop_detail_with_meals_and_viewer_like() {
    let store = MockStore::new();
    let alice = store.add_user("alice", UserRole::Normal);
    let rice = store.add_crop("Rice", 1);
    let fried = store.add_meal("Fried Rice", 10);
    let cooked = store.add_meal("Cooked Rice", 5);
    store.add_meal("Ham", 8);
    store.add_ingredient(fried.id, rice.id, 1);
    store.add_ingredient(cooked.id, rice.id, 2);
    store.add_like(alice.id, EntityRef::crop(rice.id));

    let usecase = GetCropDetailUseCase {
        crops: store.crops(),
        likes: store.likes(),
    };

    let detail = usecase.execute(rice.id, Some(alice.id)).await.unwrap();
    assert_eq!(detail.likes_count, 1);
    assert!(detail.is_liked);
    let meal_names: Vec<&str> = detail.meals.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(meal_names, vec!["Cooked Rice", "Fried Rice"]);

    let anonymous = usecase.execute(rice.id, None).await.unwrap();
    assert!(!anonymous.is_liked);
    assert_eq!(anonymous.likes_count, 1);
}

#[tokio::test]
async fn should_show_meal_detail_with_ingredient_quantities() {
    let store = MockStore::new();
    let tomato = store.add_crop("Tomato", 2);
    let onion = store.add_crop("Onion", 1);
    let soup = store.add_meal("Tomato Soup", 8);
    store.add_ingredient(soup.id, tomato.id, 2);
    store.add_ingredient(soup.id, onion.id, 1);

    let detail = GetMealDetailUseCase {
        meals: store.meals(),
        likes: store.likes(),
    }
    .execute(soup.id, None)
    .await
    .unwrap();

    let got: Vec<(&str, i32)> = detail
        .ingredients
        .iter()
        .map(|i| (i.crop.name.as_str(), i.quantity))
        .collect();
    assert_eq!(got, vec![("Onion", 1), ("Tomato", 2)]);
    assert_eq!(detail.likes_count, 0);
}

#[tokio::test]
async fn should_return_not_found_for_missing_detail() {
    let store = MockStore::new();
    let result = GetMealDetailUseCase {
        meals: store.meals(),
        likes: store.likes(),
    }
    .execute(7, None)
    .await;
    assert!(
        matches!(result, Err(WikiServiceError::MealNotFound)),
        "expected MealNotFound, got {:?}",
        result.err()
    );
}

// ── Listing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_page_crops_by_name() {
    let store = MockStore::new();
    for name in ["Tomato", "Cabbage", "Onion", "Rice", "Beetroot"] {
        store.add_crop(name, 1);
    }

    let page = ListCropsUseCase {
        repo: store.crops(),
    }
    .execute(PageRequest {
        per_page: 2,
        page: 2,
    })
    .await
    .unwrap();

    let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Onion", "Rice"]);
    assert_eq!(page.total, 5);
    assert_eq!(page.pages(), 3);
}

// ── Profile ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_liked_items_newest_first_on_profile() {
    let store = MockStore::new();
    let alice = store.add_user("alice", UserRole::Normal);
    let rice = store.add_crop("Rice", 1);
    let carrot = store.add_crop("Carrot", 3);
    let ham = store.add_meal("Ham", 8);
    store.add_like(alice.id, EntityRef::crop(rice.id));
    store.add_like(alice.id, EntityRef::meal(ham.id));
    store.add_like(alice.id, EntityRef::crop(carrot.id));

    let profile = GetProfileUseCase {
        users: store.users(),
        likes: store.likes(),
    }
    .execute(alice.id)
    .await
    .unwrap();

    let crops: Vec<&str> = profile.liked_crops.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(crops, vec!["Carrot", "Rice"]);
    assert_eq!(profile.liked_meals.len(), 1);
    assert_eq!(profile.user.username, "alice");
}

#[tokio::test]
async fn should_allow_keeping_own_username_on_profile_edit() {
    let store = MockStore::new();
    let alice = store.add_user("alice", UserRole::Normal);
    store.add_user("bob", UserRole::Normal);
    let usecase = UpdateProfileUseCase {
        users: store.users(),
    };

    let updated = usecase
        .execute(
            alice.id,
            UpdateProfileInput {
                username: Some("alice".to_owned()),
                email: Some("alice@farm.example".to_owned()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "alice@farm.example");
    assert_eq!(store.user(alice.id).unwrap().email, "alice@farm.example");

    let taken = usecase
        .execute(
            alice.id,
            UpdateProfileInput {
                username: Some("bob".to_owned()),
                email: None,
            },
        )
        .await;
    assert!(
        matches!(taken, Err(WikiServiceError::UsernameTaken)),
        "expected UsernameTaken, got {:?}",
        taken.err()
    );
}
