//! Dialect-neutral building blocks for quarry: SQL fragments, bound
//! parameters, the constraint model, SQL type markers and the shared error
//! type.

pub mod constraint;
pub mod error;
pub mod params;
pub mod schema;
pub mod sql;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export key types and traits
pub use constraint::{ConflictPolicy, Constraint, ForeignKey, ForeignKeyAction, render_constraints};
pub use error::{QuarryError, Result};
pub use params::{Param, Placeholder};
pub use schema::OrderBy;
pub use sql::{SQL, SQLChunk};
pub use traits::*;

#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use ::tracing as __tracing;
