use quarry_core::Result;
use quarry_sqlite::{HasPrimaryKey, SQLiteSQL, UpdateBuilder};
use rusqlite::Connection;

use super::execute;

/// An UPDATE of one record by primary key, bound to a connection.
pub struct UpdateQuery<'c, 'a, T> {
    conn: &'c Connection,
    builder: UpdateBuilder<'a, T>,
}

impl<'c, 'a, T: HasPrimaryKey> UpdateQuery<'c, 'a, T> {
    pub(crate) fn new(conn: &'c Connection, record: &'a T) -> Self {
        Self {
            conn,
            builder: UpdateBuilder::new(record),
        }
    }

    /// `None` when the table has nothing to update besides its key.
    pub fn to_sql(&self) -> Option<SQLiteSQL<'a>> {
        self.builder.to_sql()
    }

    /// Runs the update and returns the number of changed rows.
    pub fn exec(&self) -> Result<usize> {
        match self.builder.to_sql() {
            Some(sql) => execute(self.conn, &sql),
            None => Ok(0),
        }
    }
}
