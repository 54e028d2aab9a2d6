//! Executable queries: the rendering builders of `quarry-sqlite` bound to a
//! connection.

mod delete;
mod insert;
mod select;
mod update;

pub use delete::DeleteQuery;
pub use insert::InsertQuery;
pub use select::{JoinQuery, SelectQuery};
pub use update::UpdateQuery;

use quarry_core::Result;
use quarry_sqlite::SQLiteSQL;
use rusqlite::{Connection, params_from_iter};

/// Runs a statement that returns no rows and reports the affected row count.
pub(crate) fn execute(conn: &Connection, sql: &SQLiteSQL<'_>) -> Result<usize> {
    let text = sql.sql();
    let params = sql.params();
    quarry_core::quarry_trace_query!(&text, params.len());

    let mut statement = conn.prepare_cached(&text)?;
    Ok(statement.execute(params_from_iter(params))?)
}
