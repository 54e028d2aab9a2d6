//! SQLite dialect for quarry
//!
//! This crate maps host types onto SQLite storage classes, describes tables
//! and columns, builds typed predicates and renders every statement kind.
//! It also decodes result rows back into selections.

pub mod builder;
pub mod expression;
pub mod selection;
pub mod traits;
pub mod types;
pub mod values;

#[cfg(test)]
mod test_tables;

pub use builder::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
pub use expression::{ColumnExpr, Condition};
pub use selection::{Optional, Record, RowLayout, Selection};
pub use traits::{
    ColumnInfo, HasPrimaryKey, RowValues, SQLiteColumn, SQLiteTable, create_table_sql,
};
pub use types::{ColumnType, SQLiteBind, SQLiteType};
pub use values::{SQLiteSQL, SQLiteValue};

pub use rusqlite;

#[doc(hidden)]
pub use quarry_core as __core;
