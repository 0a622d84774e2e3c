//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` and only see the
//! use case capabilities, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::MessageCatalog;
use crate::domain::ports::{
    CreateFoodInput, CreateRequestInput, DeleteFoodInput, FoodDetailInput, ListFoodsInput,
    ListMyFoodsInput, ListRequestsForFoodInput, ListRequestsForUserInput, ListUsersInput,
    LoginInput, MyFoodDetailInput, RegisterInput, RequestActionInput, TokenVerifier,
    UpdateFoodInput, UseCase,
};

/// Food listing capabilities.
#[derive(Clone)]
pub struct FoodPorts {
    /// Listing.
    pub list: Arc<dyn UseCase<ListFoodsInput>>,
    /// Public detail.
    pub detail: Arc<dyn UseCase<FoodDetailInput>>,
    /// Creation.
    pub create: Arc<dyn UseCase<CreateFoodInput>>,
    /// Caller's own foods.
    pub list_mine: Arc<dyn UseCase<ListMyFoodsInput>>,
    /// Owner detail.
    pub my_detail: Arc<dyn UseCase<MyFoodDetailInput>>,
    /// Owner update.
    pub update: Arc<dyn UseCase<UpdateFoodInput>>,
    /// Owner soft delete.
    pub delete: Arc<dyn UseCase<DeleteFoodInput>>,
}

/// Request lifecycle capabilities.
#[derive(Clone)]
pub struct RequestPorts {
    /// Accept or reject.
    pub action: Arc<dyn UseCase<RequestActionInput>>,
    /// Creation.
    pub create: Arc<dyn UseCase<CreateRequestInput>>,
    /// Requests against one food.
    pub list_for_food: Arc<dyn UseCase<ListRequestsForFoodInput>>,
    /// Caller's own requests.
    pub list_for_user: Arc<dyn UseCase<ListRequestsForUserInput>>,
}

/// Account capabilities.
#[derive(Clone)]
pub struct AccountPorts {
    /// Registration.
    pub register: Arc<dyn UseCase<RegisterInput>>,
    /// Login.
    pub login: Arc<dyn UseCase<LoginInput>>,
    /// Listing.
    pub list: Arc<dyn UseCase<ListUsersInput>>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Food use cases.
    pub foods: FoodPorts,
    /// Request use cases.
    pub requests: RequestPorts,
    /// Account use cases.
    pub accounts: AccountPorts,
    /// Bearer token verification for [`super::auth::Actor`].
    pub tokens: Arc<dyn TokenVerifier>,
    /// Message catalog for localised envelopes.
    pub catalog: Arc<MessageCatalog>,
}
