//! Shared test utilities for logbook integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Durable stores live in a temp directory that is removed
//! when the owning [`TestStore`] is dropped.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
