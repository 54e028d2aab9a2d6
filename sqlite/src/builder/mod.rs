//! SQL rendering for every statement kind.
//!
//! Builders here are pure: they hold query state and render it to a
//! [`SQLiteSQL`](crate::values::SQLiteSQL) fragment with its bound values.
//! Executing them is the job of the connection wrapper in `quarry`.

pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

pub use delete::DeleteBuilder;
pub use insert::{InsertBuilder, MAX_PARAMETERS};
pub use select::{JoinOn, SelectBuilder};
pub use update::UpdateBuilder;

/// Tables a query starts out reading from.
pub type Source<T> = quarry_core::Cons<T, quarry_core::Nil>;
