//! Food listings and their stock counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::error_chain::FieldError;

/// Maximum length of a food name.
pub const FOOD_NAME_MAX: usize = 100;

/// A food listing owned by one user.
///
/// `quantity` is the remaining stock; it only decreases when a request is
/// accepted and never drops below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Food {
    pub id_food: Uuid,
    pub id_user: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub quantity: i32,
    pub image_url: String,
    pub is_active: bool,
    pub expired_at: Option<DateTime<Utc>>,
    pub latitude: String,
    pub longitude: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Food {
    /// Whether `user` owns this listing.
    pub fn is_owned_by(&self, user: Uuid) -> bool {
        self.id_user == user
    }

    /// Copy the owner-editable fields from `draft`.
    pub fn apply(&mut self, draft: FoodDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.description = draft.description;
        self.category = draft.category;
        self.quantity = draft.quantity;
        self.image_url = draft.image_url;
        self.expired_at = draft.expired_at;
        self.latitude = draft.latitude;
        self.longitude = draft.longitude;
        self.updated_at = now;
    }
}

/// Owner supplied fields for creating or editing a food.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct FoodDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub quantity: i32,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub expired_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
}

impl FoodDraft {
    /// Check the draft, collecting every offending field.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let name_length = self.name.trim().chars().count();
        if name_length == 0 {
            errors.push(FieldError::new("name", "name is required"));
        } else if name_length > FOOD_NAME_MAX {
            errors.push(FieldError::new(
                "name",
                format!("name must be at most {FOOD_NAME_MAX} characters"),
            ));
        }
        if self.quantity < 1 {
            errors.push(FieldError::new("quantity", "quantity must be at least 1"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Build a new active listing owned by `owner`.
    pub fn into_food(self, id_food: Uuid, owner: Uuid, now: DateTime<Utc>) -> Food {
        Food {
            id_food,
            id_user: owner,
            name: self.name,
            description: self.description,
            category: self.category,
            quantity: self.quantity,
            image_url: self.image_url,
            is_active: true,
            expired_at: self.expired_at,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for food drafts.
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn draft() -> FoodDraft {
        FoodDraft {
            name: "Nasi goreng".to_owned(),
            description: "Leftover from the office lunch".to_owned(),
            category: "meal".to_owned(),
            quantity: 10,
            image_url: String::new(),
            expired_at: None,
            latitude: "-6.2".to_owned(),
            longitude: "106.8".to_owned(),
        }
    }

    #[rstest]
    fn valid_draft_passes(draft: FoodDraft) {
        assert!(draft.validate().is_ok());
    }

    #[rstest]
    fn invalid_draft_reports_each_field(mut draft: FoodDraft) {
        draft.name = "   ".to_owned();
        draft.quantity = 0;
        let errors = draft.validate().expect_err("invalid draft");
        let fields: Vec<&str> = errors.iter().map(|err| err.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "quantity"]);
    }

    #[rstest]
    fn overlong_name_is_rejected(mut draft: FoodDraft) {
        draft.name = "x".repeat(FOOD_NAME_MAX + 1);
        assert!(draft.validate().is_err());
    }

    #[rstest]
    fn into_food_is_active_and_owned(draft: FoodDraft) {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let food = draft.into_food(Uuid::new_v4(), owner, now);
        assert!(food.is_active);
        assert!(food.is_owned_by(owner));
        assert!(!food.is_owned_by(Uuid::new_v4()));
        assert_eq!(food.created_at, now);
    }

    #[rstest]
    fn apply_keeps_identity_and_touches_updated_at(draft: FoodDraft) {
        let owner = Uuid::new_v4();
        let created = Utc::now();
        let mut food = draft.clone().into_food(Uuid::new_v4(), owner, created);
        let id = food.id_food;
        let later = created + chrono::Duration::minutes(5);
        food.apply(
            FoodDraft {
                quantity: 3,
                ..draft
            },
            later,
        );
        assert_eq!(food.id_food, id);
        assert_eq!(food.quantity, 3);
        assert_eq!(food.updated_at, later);
        assert_eq!(food.created_at, created);
    }
}
