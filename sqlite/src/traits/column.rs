use quarry_core::Result;

use crate::traits::{ColumnInfo, SQLiteTable};
use crate::types::{SQLiteType, decode_column};

/// A column of `Table`, generated as a zero-sized type per record field.
///
/// `get` and `set` are total over `Value`; they either touch the field
/// directly or go through a getter/setter method pair on the record.
pub trait SQLiteColumn: Copy + Default + 'static {
    type Table: SQLiteTable;
    type Value: SQLiteType;

    const NAME: &'static str;
    /// Position in the table's column list.
    const INDEX: usize;

    fn info() -> &'static ColumnInfo {
        &<Self::Table as SQLiteTable>::COLUMNS[Self::INDEX]
    }

    fn get(record: &Self::Table) -> Self::Value;

    fn set(record: &mut Self::Table, value: Self::Value);

    /// Reads this column at `offset + INDEX` and stores it into `record`.
    fn read_into(record: &mut Self::Table, row: &rusqlite::Row<'_>, offset: usize) -> Result<()> {
        let value = decode_column::<Self::Value>(row, offset + Self::INDEX)?;
        Self::set(record, value);
        Ok(())
    }
}
