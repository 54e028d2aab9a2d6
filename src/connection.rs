use std::path::Path;

use quarry_core::types::Compatible;
use quarry_core::{OrderBy, Result};
use quarry_sqlite::builder::Source;
use quarry_sqlite::expression::SQLTypeOf;
use quarry_sqlite::{
    HasPrimaryKey, InsertBuilder, Record, SQLiteBind, SQLiteTable, Selection, create_table_sql,
};
use rusqlite::Connection;

use crate::builder::{DeleteQuery, InsertQuery, SelectQuery, UpdateQuery, execute};

/// A SQLite connection with typed CRUD entry points.
///
/// Quarry owns the [`rusqlite::Connection`]; pragmas and other engine
/// settings are applied to it before it is handed over, or through
/// [`connection`](Self::connection).
pub struct Quarry {
    conn: Connection,
}

impl Quarry {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Connection::open(path)?))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_inner(self) -> Connection {
        self.conn
    }

    /// Creates the table for `T`.
    pub fn create_table<T: SQLiteTable>(&self, if_not_exists: bool) -> Result<()> {
        let sql = create_table_sql::<T>(if_not_exists);
        quarry_core::quarry_trace_query!(&sql, 0);
        self.conn.execute(&sql, [])?;
        Ok(())
    }

    /// Starts a SELECT of `S` from the table of `S`.
    pub fn select_query<S: Selection>(&self) -> SelectQuery<'_, S, Source<S::Table>> {
        SelectQuery::new(&self.conn)
    }

    /// Starts a DELETE from `T`.
    pub fn delete_query<T: SQLiteTable>(&self) -> DeleteQuery<'_, T> {
        DeleteQuery::new(&self.conn)
    }

    pub fn insert_query<'a, T: SQLiteTable>(&self, records: &'a [T]) -> InsertQuery<'_, 'a, T> {
        InsertQuery::new(&self.conn, records)
    }

    pub fn update_query<'a, T: HasPrimaryKey>(&self, record: &'a T) -> UpdateQuery<'_, 'a, T> {
        UpdateQuery::new(&self.conn, record)
    }

    /// Looks a record up by primary key.
    pub fn find_record<T, K>(&self, key: K) -> Result<Option<T>>
    where
        T: Record + HasPrimaryKey,
        K: SQLiteBind,
        K::SQLType: Compatible<SQLTypeOf<T::PrimaryKey>>,
    {
        self.select_query::<T>().where_key(key).fetch_one()
    }

    /// Inserts `record`. When the engine assigns its key, the new rowid is
    /// written back into the record.
    pub fn insert_record<T: SQLiteTable>(&self, record: &mut T) -> Result<()> {
        let assigned = record.auto_key_unset();
        execute(&self.conn, &InsertBuilder::single(record).to_sql())?;
        if assigned {
            record.assign_rowid(self.conn.last_insert_rowid())?;
        }
        Ok(())
    }

    /// Inserts all `records` in one transaction, keeping their order.
    pub fn insert_many_records<T: SQLiteTable>(&self, records: &[T]) -> Result<()> {
        self.insert_query(records).exec()?;
        Ok(())
    }

    /// Writes every non-key column of `record` to the row with its key.
    pub fn update_record<T: HasPrimaryKey>(&self, record: &T) -> Result<usize> {
        self.update_query(record).exec()
    }

    /// Deletes the record with primary key `key`.
    pub fn delete_record<T, K>(&self, key: K) -> Result<usize>
    where
        T: HasPrimaryKey,
        K: SQLiteBind,
        K::SQLType: Compatible<SQLTypeOf<T::PrimaryKey>>,
    {
        self.delete_query::<T>().where_key(key).exec()
    }

    /// Deletes every row of `T`.
    pub fn truncate<T: SQLiteTable>(&self) -> Result<usize> {
        self.delete_query::<T>().exec()
    }

    /// The record with the smallest primary key.
    pub fn first<T: Record + HasPrimaryKey>(&self) -> Result<Option<T>> {
        self.select_query::<T>()
            .order_by(<T::PrimaryKey as Default>::default(), OrderBy::Asc)
            .fetch_one()
    }

    /// The record with the largest primary key.
    pub fn last<T: Record + HasPrimaryKey>(&self) -> Result<Option<T>> {
        self.select_query::<T>()
            .order_by(<T::PrimaryKey as Default>::default(), OrderBy::Desc)
            .fetch_one()
    }
}

impl From<Connection> for Quarry {
    fn from(conn: Connection) -> Self {
        Self::new(conn)
    }
}

impl std::fmt::Debug for Quarry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quarry")
            .field("path", &self.conn.path())
            .finish()
    }
}
