//! SQLite-specific traits for tables and columns

mod column;
mod table;

pub use column::*;
pub use table::*;
