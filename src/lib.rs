//! # quarry
//!
//! A compile-time checked mapping between Rust structs and SQLite tables.
//!
//! Declare a table once on the struct; quarry derives a zero-sized type per
//! column, checks predicates and joins against the tables a query reads,
//! and decodes result rows back into records, columns and tuples.
//!
//! ## Quick Start
//!
//! ```rust
//! use quarry::prelude::*;
//!
//! #[SQLiteTable(name = "users")]
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct User {
//!     #[column(primary)]
//!     id: i64,
//!     #[column(unique)]
//!     name: String,
//!     age: Option<i32>,
//! }
//!
//! # fn main() -> quarry::Result<()> {
//! let db = Quarry::open_in_memory()?;
//! db.create_table::<User>(false)?;
//!
//! let mut ann = User { id: 0, name: "ann".into(), age: Some(31) };
//! db.insert_record(&mut ann)?;
//! assert_eq!(ann.id, 1);
//!
//! let adults: Vec<String> = db
//!     .select_query::<UserName>()
//!     .r#where(UserAge.gte(18))
//!     .order_by(UserName, OrderBy::Asc)
//!     .many()?
//!     .to_vec()?;
//! assert_eq!(adults, vec!["ann".to_string()]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Declaration errors
//!
//! Problems in a table declaration are compile errors.
//!
//! Two primary keys:
//!
//! ```compile_fail
//! use quarry::prelude::*;
//!
//! #[SQLiteTable]
//! #[derive(Default)]
//! struct Pair {
//!     #[column(primary)]
//!     a: i64,
//!     #[column(primary)]
//!     b: i64,
//! }
//! ```
//!
//! Two columns with the same name:
//!
//! ```compile_fail
//! use quarry::prelude::*;
//!
//! #[SQLiteTable]
//! #[derive(Default)]
//! struct Clash {
//!     #[column(name = "value")]
//!     first: i64,
//!     #[column(name = "value")]
//!     second: i64,
//! }
//! ```
//!
//! A getter without a setter:
//!
//! ```compile_fail
//! use quarry::prelude::*;
//!
//! #[SQLiteTable]
//! #[derive(Default)]
//! struct Half {
//!     #[column(get = label)]
//!     label: String,
//! }
//!
//! impl Half {
//!     fn label(&self) -> String {
//!         self.label.clone()
//!     }
//! }
//! ```
//!
//! A field type with no SQLite storage class:
//!
//! ```compile_fail
//! use quarry::prelude::*;
//!
//! #[SQLiteTable]
//! #[derive(Default)]
//! struct Unsupported {
//!     when: std::time::Duration,
//! }
//! ```
//!
//! A filter on a table the query does not read:
//!
//! ```compile_fail
//! use quarry::prelude::*;
//!
//! #[SQLiteTable]
//! #[derive(Default)]
//! struct Left {
//!     #[column(primary)]
//!     id: i64,
//! }
//!
//! #[SQLiteTable]
//! #[derive(Default)]
//! struct Right {
//!     #[column(primary)]
//!     id: i64,
//! }
//!
//! # fn main() -> quarry::Result<()> {
//! let db = Quarry::open_in_memory()?;
//! let _ = db.select_query::<Left>().r#where(RightId.eq(1));
//! # Ok(())
//! # }
//! ```
//!
//! A selection that reads a table the query never joins:
//!
//! ```compile_fail
//! use quarry::prelude::*;
//!
//! #[SQLiteTable]
//! #[derive(Default)]
//! struct Left {
//!     #[column(primary)]
//!     id: i64,
//! }
//!
//! #[SQLiteTable]
//! #[derive(Default)]
//! struct Right {
//!     #[column(primary)]
//!     id: i64,
//! }
//!
//! # fn main() -> quarry::Result<()> {
//! let db = Quarry::open_in_memory()?;
//! let mut query = db.select_query::<(Left, Right)>();
//! let _ = query.many()?;
//! # Ok(())
//! # }
//! ```
//!
//! Comparing a text column with an integer:
//!
//! ```compile_fail
//! use quarry::prelude::*;
//!
//! #[SQLiteTable]
//! #[derive(Default)]
//! struct Note {
//!     body: String,
//! }
//!
//! let _ = NoteBody.eq(5);
//! ```

extern crate self as quarry;

mod builder;
mod connection;
mod rows;

pub use builder::{DeleteQuery, InsertQuery, JoinQuery, SelectQuery, UpdateQuery};
pub use connection::Quarry;
pub use rows::RecordIterator;

/// Result type for quarry operations
pub use quarry_core::error::Result;

/// Error types
pub mod error {
    pub use quarry_core::error::QuarryError;
}

pub use quarry_macros::SQLiteTable;

/// Dialect-neutral building blocks: SQL fragments, ordering, constraints,
/// type markers and type-level table sets.
pub mod core {
    pub use quarry_core::*;
}

/// The SQLite dialect: value mapping, table and column traits, expressions,
/// selections and statement rendering.
pub mod sqlite {
    pub use quarry_sqlite::*;
}

/// Everything needed to declare tables and run queries.
pub mod prelude {
    pub use quarry_macros::SQLiteTable;

    pub use quarry_core::OrderBy;
    pub use quarry_sqlite::{
        ColumnExpr, Condition, HasPrimaryKey, Optional, Record, SQLiteColumn, SQLiteTable,
        Selection,
    };

    pub use crate::{Quarry, RecordIterator, Result};
}
