use quarry_core::Result;
use quarry_sqlite::{InsertBuilder, SQLiteSQL, SQLiteTable};
use rusqlite::Connection;

use super::execute;

/// An INSERT of a slice of records, bound to a connection.
///
/// The records go in as few multi-row statements as the parameter limit
/// and their keys allow, inside one transaction. Keys the engine assigns
/// are not written back; use [`Quarry::insert_record`](crate::Quarry::insert_record)
/// for that.
pub struct InsertQuery<'c, 'a, T> {
    conn: &'c Connection,
    records: &'a [T],
}

impl<'c, 'a, T: SQLiteTable> InsertQuery<'c, 'a, T> {
    pub(crate) fn new(conn: &'c Connection, records: &'a [T]) -> Self {
        Self { conn, records }
    }

    /// The statements `exec` runs, in order.
    pub fn to_sql(&self) -> Vec<SQLiteSQL<'a>> {
        InsertBuilder::batches(self.records)
            .iter()
            .map(InsertBuilder::to_sql)
            .collect()
    }

    /// Inserts every record and returns the number of inserted rows.
    ///
    /// Nothing is written when any statement fails. Must not be called
    /// while the connection is inside another transaction.
    pub fn exec(&self) -> Result<usize> {
        if self.records.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        quarry_core::quarry_trace_tx!("begin");

        let inserted = InsertBuilder::batches(self.records)
            .iter()
            .try_fold(0, |total, batch| -> Result<usize> {
                Ok(total + execute(self.conn, &batch.to_sql())?)
            });

        match inserted {
            Ok(total) => {
                tx.commit()?;
                quarry_core::quarry_trace_tx!("commit");
                Ok(total)
            }
            Err(err) => {
                quarry_core::quarry_trace_tx!("rollback");
                if let Err(rollback) = tx.rollback() {
                    quarry_core::quarry_trace_tx!("rollback failed", rollback);
                }
                Err(err)
            }
        }
    }
}
