use quarry_core::types::Compatible;
use quarry_core::{Result, SubsetOf};
use quarry_sqlite::builder::Source;
use quarry_sqlite::expression::SQLTypeOf;
use quarry_sqlite::{Condition, DeleteBuilder, HasPrimaryKey, SQLiteBind, SQLiteSQL, SQLiteTable};
use rusqlite::Connection;

use super::execute;

/// A DELETE bound to a connection. Without a filter it empties the table.
pub struct DeleteQuery<'c, T> {
    conn: &'c Connection,
    builder: DeleteBuilder<T>,
}

impl<'c, T: SQLiteTable> DeleteQuery<'c, T> {
    pub(crate) fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            builder: DeleteBuilder::new(),
        }
    }

    #[inline]
    pub fn r#where<C, W>(self, condition: Condition<C>) -> Self
    where
        C: SubsetOf<Source<T>, W>,
    {
        Self {
            conn: self.conn,
            builder: self.builder.r#where(condition),
        }
    }

    #[inline]
    pub fn where_key<V>(self, key: V) -> Self
    where
        T: HasPrimaryKey,
        V: SQLiteBind,
        V::SQLType: Compatible<SQLTypeOf<T::PrimaryKey>>,
    {
        Self {
            conn: self.conn,
            builder: self.builder.where_key(key),
        }
    }

    pub fn to_sql(&self) -> SQLiteSQL<'static> {
        self.builder.to_sql()
    }

    /// Runs the delete and returns the number of removed rows.
    pub fn exec(&self) -> Result<usize> {
        execute(self.conn, &self.builder.to_sql())
    }
}

impl<T: SQLiteTable> std::fmt::Debug for DeleteQuery<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteQuery")
            .field("builder", &self.builder)
            .finish()
    }
}
