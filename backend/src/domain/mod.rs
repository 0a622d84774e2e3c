//! Domain primitives, services and ports.
//!
//! Purpose: hold the food-sharing rules independent of HTTP and SQL. Services
//! implement [`ports::UseCase`] and answer with a [`ResponseEnvelope`];
//! adapters implement the driven ports.
//!
//! Public surface:
//! - Food, FoodDraft: shared food stock.
//! - Request, RequestWithFood, RequestAction: claims on a food and their
//!   resolution.
//! - ErrorChain, ErrorEvent: nested failure frames.
//! - ResponseEnvelope: the uniform response body.
//! - FulfillmentCoordinator, FoodService, RequestService, AccountService:
//!   use case implementations.

pub mod account_service;
pub mod auth;
pub mod envelope;
pub mod error_chain;
pub mod food;
pub mod food_service;
pub mod fulfillment;
pub mod localization;
pub mod messages;
pub mod ports;
pub mod request;
pub mod request_service;
pub mod trace_id;
pub mod user;

#[cfg(test)]
pub(crate) mod test_clock;

pub use self::account_service::AccountService;
pub use self::auth::{IssuedToken, LoginCredentials, LoginValidationError, TokenSubject};
pub use self::envelope::{Labels, Meta, Outcome, ResponseEnvelope, derive_labels, settle};
pub use self::error_chain::{
    Cause, ErrorChain, ErrorEvent, ErrorFrame, FieldError, FrameCause, codes,
};
pub use self::food::{FOOD_NAME_MAX, Food, FoodDraft};
pub use self::food_service::FoodService;
pub use self::fulfillment::FulfillmentCoordinator;
pub use self::localization::{
    BUNDLED_CATALOG, CatalogEntry, CatalogValidationError, LanguageTag, MessageCatalog,
};
pub use self::request::{
    Request, RequestAction, RequestDraft, RequestStatus, RequestWithFood, UnknownAction,
    UnknownRequestStatus,
};
pub use self::request_service::RequestService;
pub use self::trace_id::TraceId;
pub use self::user::{Registration, User, UserCredentials};
