use std::collections::HashMap;

use anyhow::Context;
use chrono::Utc;
use uuid::Uuid;

use delight_auth_types::password::hash_password;
use delight_domain::user::UserRole;

use crate::domain::repository::{CropRepository, MealRepository, UserRepository};
use crate::domain::types::{CropDraft, IngredientDraft, MealDraft, User};
use crate::domain::validate::{validate_email, validate_password, validate_username};
use crate::error::WikiServiceError;

struct CropSeed {
    name: &'static str,
    description: &'static str,
    hunger_points: i32,
}

struct MealSeed {
    name: &'static str,
    description: &'static str,
    hunger_restored: i32,
    saturation: f64,
    ingredients: &'static [&'static str],
}

const CROPS: &[CropSeed] = &[
    CropSeed {
        name: "Cabbage",
        description: "Cabbage is a leafy vegetable crop that can be grown from cabbage seeds. It restores 1 hunger point when eaten raw.",
        hunger_points: 1,
    },
    CropSeed {
        name: "Tomato",
        description: "Tomato is a red fruit crop that can be grown from tomato seeds. It restores 2 hunger points and can be used in various recipes.",
        hunger_points: 2,
    },
    CropSeed {
        name: "Onion",
        description: "Onion is a bulbous vegetable that can be grown from onion seeds. It restores 1 hunger point and is commonly used as a cooking ingredient.",
        hunger_points: 1,
    },
    CropSeed {
        name: "Rice",
        description: "Rice is a grain crop that can be grown from rice seeds. It must be cooked before consumption and is a staple ingredient in many meals.",
        hunger_points: 1,
    },
    CropSeed {
        name: "Beetroot",
        description: "Beetroot is a root vegetable that can be grown from beetroot seeds. It restores 1 hunger point and has a deep red color.",
        hunger_points: 1,
    },
    CropSeed {
        name: "Carrot",
        description: "Carrot is an orange root vegetable that restores 3 hunger points. It can be eaten raw or used in various recipes.",
        hunger_points: 3,
    },
    CropSeed {
        name: "Potato",
        description: "Potato is a starchy tuber that restores 1 hunger point when raw. It can be cooked in various ways to create delicious meals.",
        hunger_points: 1,
    },
];

const MEALS: &[MealSeed] = &[
    MealSeed {
        name: "Noodle Soup",
        description: "A type of soup-based staple food where cooked noodles are soaked in a flavorful clear or thick broth.",
        hunger_restored: 14,
        saturation: 12.0,
        ingredients: &[],
    },
    MealSeed {
        name: "Fried Rice",
        description: "A flavorful dish made with cooked rice, vegetables, and seasonings. A popular meal that restores 10 hunger points.",
        hunger_restored: 10,
        saturation: 8.0,
        ingredients: &["Rice", "Onion", "Carrot"],
    },
    MealSeed {
        name: "Cooked Rice",
        description: "Simple cooked rice that restores 5 hunger points. A basic staple food.",
        hunger_restored: 5,
        saturation: 3.0,
        ingredients: &["Rice"],
    },
    MealSeed {
        name: "Honey Glazed Ham",
        description: "A succulent ham glazed with honey. Restores 14 hunger points and provides excellent saturation.",
        hunger_restored: 14,
        saturation: 12.8,
        ingredients: &[],
    },
    MealSeed {
        name: "Smoked Ham",
        description: "A smoked ham that restores 12 hunger points. Rich in flavor and nutrition.",
        hunger_restored: 12,
        saturation: 10.4,
        ingredients: &[],
    },
    MealSeed {
        name: "Ham",
        description: "A basic ham that restores 8 hunger points. Can be used in various recipes.",
        hunger_restored: 8,
        saturation: 6.4,
        ingredients: &[],
    },
    MealSeed {
        name: "Tomato Soup",
        description: "A warm and comforting soup made from tomatoes. Restores 8 hunger points.",
        hunger_restored: 8,
        saturation: 6.0,
        ingredients: &["Tomato", "Onion"],
    },
    MealSeed {
        name: "Vegetable Salad",
        description: "A fresh and healthy salad made with various vegetables. Restores 6 hunger points.",
        hunger_restored: 6,
        saturation: 4.2,
        ingredients: &["Cabbage", "Tomato", "Carrot"],
    },
    MealSeed {
        name: "Beetroot Soup",
        description: "A vibrant soup made from beetroot. Restores 7 hunger points and provides good nutrition.",
        hunger_restored: 7,
        saturation: 5.2,
        ingredients: &["Beetroot", "Onion"],
    },
    MealSeed {
        name: "Stuffed Pumpkin",
        description: "A pumpkin stuffed with various ingredients. Restores 12 hunger points and is a feast for special occasions.",
        hunger_restored: 12,
        saturation: 9.6,
        ingredients: &[],
    },
];

pub struct SeedAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Rows inserted by one seeding run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub crops_created: usize,
    pub meals_created: usize,
}

pub struct SeedUseCase<U, C, M>
where
    U: UserRepository,
    C: CropRepository,
    M: MealRepository,
{
    pub users: U,
    pub crops: C,
    pub meals: M,
}

impl<U, C, M> SeedUseCase<U, C, M>
where
    U: UserRepository,
    C: CropRepository,
    M: MealRepository,
{
    /// Insert the admin account and the reference catalog. Rows that already
    /// exist by username or name are left as they are.
    pub async fn execute(&self, admin: SeedAdmin) -> Result<SeedReport, WikiServiceError> {
        let mut report = SeedReport {
            admin_created: self.seed_admin(admin).await?,
            ..SeedReport::default()
        };

        let mut crop_ids = HashMap::with_capacity(CROPS.len());
        for seed in CROPS {
            let crop = match self.crops.find_by_name(seed.name).await? {
                Some(crop) => crop,
                None => {
                    report.crops_created += 1;
                    self.crops
                        .create(&CropDraft {
                            name: seed.name.to_owned(),
                            description: Some(seed.description.to_owned()),
                            image_url: Some(format!("/static/images/crops/{}.jpg", seed.name)),
                            hunger_points: seed.hunger_points,
                        })
                        .await?
                }
            };
            crop_ids.insert(seed.name, crop.id);
        }

        for seed in MEALS {
            if self.meals.find_by_name(seed.name).await?.is_some() {
                continue;
            }
            let ingredients = seed
                .ingredients
                .iter()
                .filter_map(|name| crop_ids.get(name))
                .map(|&crop_id| IngredientDraft {
                    crop_id,
                    quantity: 1,
                })
                .collect();
            self.meals
                .create(&MealDraft {
                    name: seed.name.to_owned(),
                    description: Some(seed.description.to_owned()),
                    image_url: None,
                    hunger_restored: seed.hunger_restored,
                    saturation: seed.saturation,
                    ingredients: Some(ingredients),
                })
                .await?;
            report.meals_created += 1;
        }

        tracing::info!(
            admin_created = report.admin_created,
            crops_created = report.crops_created,
            meals_created = report.meals_created,
            "seed complete"
        );
        Ok(report)
    }

    async fn seed_admin(&self, admin: SeedAdmin) -> Result<bool, WikiServiceError> {
        let username = admin.username.trim();
        let email = admin.email.trim();
        if self.users.username_taken(username, None).await? {
            return Ok(false);
        }
        validate_username(username)?;
        validate_email(email)?;
        validate_password(&admin.password)?;
        if self.users.email_taken(email, None).await? {
            return Err(WikiServiceError::EmailTaken);
        }

        self.users
            .create(&User {
                id: Uuid::now_v7(),
                username: username.to_owned(),
                email: email.to_owned(),
                password_hash: hash_password(&admin.password).context("hash password")?,
                role: UserRole::Admin,
                created_at: Utc::now(),
            })
            .await?;
        Ok(true)
    }
}
