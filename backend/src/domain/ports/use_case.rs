//! Driving port shared by every use case, plus the inputs each one accepts.
//!
//! Inbound adapters hold `Arc<dyn UseCase<I>>` per input type and never see
//! the services behind them. A use case always answers with an envelope;
//! failures are already folded into it.

use async_trait::async_trait;
use pagination::PageRequest;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::{FoodDraft, Registration, RequestDraft, ResponseEnvelope};

/// Capability implemented once per input type.
#[async_trait]
pub trait UseCase<I>: Send + Sync
where
    I: Send + 'static,
{
    /// Run the use case to completion.
    async fn resolve(&self, input: I) -> ResponseEnvelope;
}

/// Owner resolves a pending request.
///
/// `action` is passed through raw so unknown values surface as field errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestActionInput {
    /// Authenticated caller.
    pub actor: Uuid,
    /// Request to resolve.
    pub id_request: Uuid,
    /// `accept` or `reject`.
    pub action: String,
}

/// Requester asks for part of a food.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateRequestInput {
    /// Authenticated caller.
    pub actor: Uuid,
    /// Target food.
    pub id_food: Uuid,
    /// Validated by the use case.
    pub draft: RequestDraft,
}

/// Owner lists requests against one of their foods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRequestsForFoodInput {
    /// Authenticated caller.
    pub actor: Uuid,
    /// Target food.
    pub id_food: Uuid,
    /// Requested page.
    pub page: PageRequest,
}

/// Requester lists their own requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRequestsForUserInput {
    /// Authenticated caller.
    pub actor: Uuid,
    /// Requested page.
    pub page: PageRequest,
}

/// Anyone lists live foods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFoodsInput {
    /// Requested page.
    pub page: PageRequest,
}

/// Public detail of a live food.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodDetailInput {
    /// Target food.
    pub id_food: Uuid,
}

/// Owner publishes a food.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFoodInput {
    /// Authenticated caller.
    pub actor: Uuid,
    /// Validated by the use case.
    pub draft: FoodDraft,
}

/// Owner lists their foods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMyFoodsInput {
    /// Authenticated caller.
    pub actor: Uuid,
    /// Requested page.
    pub page: PageRequest,
}

/// Owner reads one of their foods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MyFoodDetailInput {
    /// Authenticated caller.
    pub actor: Uuid,
    /// Target food.
    pub id_food: Uuid,
}

/// Owner edits one of their foods.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateFoodInput {
    /// Authenticated caller.
    pub actor: Uuid,
    /// Target food.
    pub id_food: Uuid,
    /// Validated by the use case.
    pub draft: FoodDraft,
}

/// Owner removes one of their foods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteFoodInput {
    /// Authenticated caller.
    pub actor: Uuid,
    /// Target food.
    pub id_food: Uuid,
}

/// New account registration.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    /// Submitted account details.
    pub registration: Registration,
}

/// Credential exchange.
#[derive(Debug, Clone)]
pub struct LoginInput {
    /// Login email.
    pub email: String,
    /// Plain password, wiped on drop.
    pub password: Zeroizing<String>,
}

/// Authenticated account listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListUsersInput {
    /// Requested page.
    pub page: PageRequest,
}
