//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside the handlers:
//! trace id propagation and panic recovery.

pub mod catch_panic;
pub mod trace;

pub use catch_panic::CatchPanic;
pub use trace::Trace;
