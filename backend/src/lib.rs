//! Food sharing marketplace backend.
//!
//! Donors publish surplus food, other users request a quantity of it, and the
//! donor accepts or rejects each request. Accepting moves stock atomically.
//! The crate is laid out hexagonally: [`domain`] holds the rules and ports,
//! [`inbound`] and [`outbound`] adapt HTTP and PostgreSQL to them.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::{CatchPanic, Trace};
