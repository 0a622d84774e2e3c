//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live next to
//! the rows they read.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Food, Request, RequestStatus, RequestWithFood, UnknownRequestStatus, User, UserCredentials,
};

use super::schema::{foods, requests, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Public columns of an account.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id_user: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub image_url: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id_user: row.id_user,
            name: row.name,
            email: row.email,
            phone_number: row.phone_number,
            image_url: row.image_url,
        }
    }
}

/// Account columns plus the stored password hash.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserCredentialsRow {
    #[diesel(embed)]
    pub user: UserRow,
    pub password: String,
}

impl From<UserCredentialsRow> for UserCredentials {
    fn from(row: UserCredentialsRow) -> Self {
        Self {
            user: row.user.into(),
            password_hash: row.password,
        }
    }
}

/// Insertable struct for new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id_user: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub password: &'a str,
    pub image_url: &'a str,
}

impl<'a> From<&'a UserCredentials> for NewUserRow<'a> {
    fn from(credentials: &'a UserCredentials) -> Self {
        Self {
            id_user: credentials.user.id_user,
            name: &credentials.user.name,
            email: &credentials.user.email,
            phone_number: &credentials.user.phone_number,
            password: &credentials.password_hash,
            image_url: &credentials.user.image_url,
        }
    }
}

// ---------------------------------------------------------------------------
// Foods
// ---------------------------------------------------------------------------

/// Row struct for reading live foods.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = foods)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FoodRow {
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

impl From<FoodRow> for Food {
    fn from(row: FoodRow) -> Self {
        Self {
            id_food: row.id_food,
            id_user: row.id_user,
            name: row.name,
            description: row.description,
            category: row.category,
            quantity: row.quantity,
            image_url: row.image_url,
            is_active: row.is_active,
            expired_at: row.expired_at,
            latitude: row.latitude,
            longitude: row.longitude,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for new foods.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = foods)]
pub(crate) struct NewFoodRow<'a> {
    pub id_food: Uuid,
    pub id_user: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub quantity: i32,
    pub image_url: &'a str,
    pub is_active: bool,
    pub expired_at: Option<DateTime<Utc>>,
    pub latitude: &'a str,
    pub longitude: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Food> for NewFoodRow<'a> {
    fn from(food: &'a Food) -> Self {
        Self {
            id_food: food.id_food,
            id_user: food.id_user,
            name: &food.name,
            description: &food.description,
            category: &food.category,
            quantity: food.quantity,
            image_url: &food.image_url,
            is_active: food.is_active,
            expired_at: food.expired_at,
            latitude: &food.latitude,
            longitude: &food.longitude,
            created_at: food.created_at,
            updated_at: food.updated_at,
        }
    }
}

/// Owner-editable columns.
///
/// `expired_at` is written even when `None` so an owner can clear it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = foods)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct FoodUpdate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub quantity: i32,
    pub image_url: &'a str,
    pub expired_at: Option<DateTime<Utc>>,
    pub latitude: &'a str,
    pub longitude: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Food> for FoodUpdate<'a> {
    fn from(food: &'a Food) -> Self {
        Self {
            name: &food.name,
            description: &food.description,
            category: &food.category,
            quantity: food.quantity,
            image_url: &food.image_url,
            expired_at: food.expired_at,
            latitude: &food.latitude,
            longitude: &food.longitude,
            updated_at: food.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Row struct for reading requests.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RequestRow {
    pub id_request: Uuid,
    pub id_user: Uuid,
    pub id_food: Uuid,
    pub status: i16,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RequestRow> for Request {
    type Error = UnknownRequestStatus;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id_request: row.id_request,
            id_user: row.id_user,
            id_food: row.id_food,
            status: RequestStatus::try_from(row.status)?,
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for new requests.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = requests)]
pub(crate) struct NewRequestRow {
    pub id_request: Uuid,
    pub id_user: Uuid,
    pub id_food: Uuid,
    pub status: i16,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Request> for NewRequestRow {
    fn from(request: &Request) -> Self {
        Self {
            id_request: request.id_request,
            id_user: request.id_user,
            id_food: request.id_food,
            status: request.status.code(),
            quantity: request.quantity,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

/// Pending request joined with its food's owner and stock.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct PendingJoinRow {
    pub id_request: Uuid,
    pub id_user: Uuid,
    pub id_food: Uuid,
    pub status: i16,
    pub quantity: i32,
    pub id_user_food: Uuid,
    pub stock: i32,
}

impl TryFrom<PendingJoinRow> for RequestWithFood {
    type Error = UnknownRequestStatus;

    fn try_from(row: PendingJoinRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id_request: row.id_request,
            id_user: row.id_user,
            id_food: row.id_food,
            status: RequestStatus::try_from(row.status)?,
            quantity: row.quantity,
            id_user_food: row.id_user_food,
            stock: row.stock,
        })
    }
}
