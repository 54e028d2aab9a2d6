use smallvec::SmallVec;

use crate::traits::{HasPrimaryKey, SQLiteColumn};
use crate::values::{SQLiteSQL, SQLiteValue};

/// Builds `UPDATE t SET ... WHERE pk = ?` for one record.
#[derive(Debug)]
pub struct UpdateBuilder<'a, T> {
    record: &'a T,
}

impl<'a, T: HasPrimaryKey> UpdateBuilder<'a, T> {
    pub fn new(record: &'a T) -> Self {
        Self { record }
    }

    /// Binds every non-key column in table order, then the key.
    ///
    /// Returns `None` when the table has no column besides its key.
    pub fn to_sql(&self) -> Option<SQLiteSQL<'a>> {
        let key = <T::PrimaryKey as SQLiteColumn>::INDEX;
        let mut key_value = SQLiteValue::Null;
        let mut assignments: SmallVec<[SQLiteSQL<'a>; 8]> = SmallVec::new();

        for (index, (column, value)) in T::COLUMNS
            .iter()
            .zip(self.record.values())
            .enumerate()
        {
            if index == key {
                key_value = value;
            } else {
                assignments.push(
                    SQLiteSQL::ident(column.name)
                        .push("=")
                        .append(SQLiteSQL::parameter(value)),
                );
            }
        }
        if assignments.is_empty() {
            return None;
        }

        Some(
            SQLiteSQL::text("UPDATE")
                .append(SQLiteSQL::table(T::NAME))
                .push("SET")
                .append(SQLiteSQL::join(assignments, ", "))
                .push("WHERE")
                .append(SQLiteSQL::ident(T::COLUMNS[key].name))
                .push("=")
                .append(SQLiteSQL::parameter(key_value)),
        )
    }
}
