use quarry_core::{Constraint, Result, SQL, render_constraints};
use rusqlite::types::ValueRef;
use smallvec::SmallVec;

use crate::traits::SQLiteColumn;
use crate::types::{ColumnType, SQLiteType};
use crate::values::{SQLiteSQL, SQLiteValue};

/// Column values of one record, in table order.
pub type RowValues<'a> = SmallVec<[SQLiteValue<'a>; 8]>;

/// Static description of one column, as stored in [`SQLiteTable::COLUMNS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub nullable: bool,
    pub primary_key: bool,
    /// An INTEGER primary key on a rowid table; the engine assigns it.
    pub auto_increment: bool,
    pub constraints: &'static [Constraint],
}

impl ColumnInfo {
    /// `` `name` TYPE constraints ``
    pub fn definition(&self) -> SQLiteSQL<'static> {
        let sql = SQL::ident(self.name).push(self.column_type.as_str());
        let constraints = render_constraints(self.nullable, self.constraints);
        if constraints.is_empty() {
            sql
        } else {
            sql.append_raw(constraints)
        }
    }
}

/// A record type mapped onto a SQLite table.
///
/// Implemented by `#[SQLiteTable]`; the column order of [`COLUMNS`](Self::COLUMNS)
/// is the projection and insertion order.
pub trait SQLiteTable: Default + Sized + 'static {
    const NAME: &'static str;
    const COLUMNS: &'static [ColumnInfo];
    const STRICT: bool = false;
    const WITHOUT_ROWID: bool = false;
    /// Index of the primary key in `COLUMNS`.
    const PRIMARY_KEY: Option<usize> = None;

    /// Column values in table order.
    fn values(&self) -> RowValues<'_>;

    /// Builds a record from the columns starting at `offset`.
    fn from_row_at(row: &rusqlite::Row<'_>, offset: usize) -> Result<Self>;

    /// True when the auto-increment key still holds its default value.
    fn auto_key_unset(&self) -> bool {
        match Self::PRIMARY_KEY {
            Some(index) if Self::COLUMNS[index].auto_increment => matches!(
                self.values().get(index),
                Some(SQLiteValue::Integer(0) | SQLiteValue::Null)
            ),
            _ => false,
        }
    }

    /// Stores an engine-assigned rowid into the auto-increment key.
    fn assign_rowid(&mut self, _rowid: i64) -> Result<()> {
        Ok(())
    }
}

/// A table with a primary key column.
#[diagnostic::on_unimplemented(
    message = "table `{Self}` has no primary key",
    label = "this operation looks records up by primary key",
    note = "mark one field with `#[column(primary)]`"
)]
pub trait HasPrimaryKey: SQLiteTable {
    type PrimaryKey: SQLiteColumn<Table = Self>;
}

/// Writes `rowid` into the primary key of `record` if the key is auto-increment.
pub fn assign_rowid<T: HasPrimaryKey>(record: &mut T, rowid: i64) -> Result<()> {
    let info = <T::PrimaryKey as SQLiteColumn>::info();
    if info.auto_increment {
        let index = <T::PrimaryKey as SQLiteColumn>::INDEX;
        let value = <<T::PrimaryKey as SQLiteColumn>::Value as SQLiteType>::from_value(
            ValueRef::Integer(rowid),
            index,
        )?;
        <T::PrimaryKey as SQLiteColumn>::set(record, value);
    }
    Ok(())
}

/// Renders `CREATE TABLE [IF NOT EXISTS] `name` (...)` for `T`.
pub fn create_table_sql<T: SQLiteTable>(if_not_exists: bool) -> String {
    let mut sql: SQLiteSQL<'static> = SQL::text("CREATE TABLE");
    if if_not_exists {
        sql = sql.push("IF NOT EXISTS");
    }
    sql = sql
        .append(SQLiteSQL::table(T::NAME))
        .append(SQLiteSQL::join(T::COLUMNS.iter().map(ColumnInfo::definition), ", ").parens());

    match (T::STRICT, T::WITHOUT_ROWID) {
        (true, true) => sql = sql.push("STRICT, WITHOUT ROWID"),
        (true, false) => sql = sql.push("STRICT"),
        (false, true) => sql = sql.push("WITHOUT ROWID"),
        (false, false) => {}
    }
    sql.sql()
}
