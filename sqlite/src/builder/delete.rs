use std::marker::PhantomData;

use quarry_core::types::Compatible;
use quarry_core::{SubsetOf, ToSQL};

use super::Source;
use crate::expression::{ColumnExpr, Condition, SQLTypeOf};
use crate::traits::{HasPrimaryKey, SQLiteTable};
use crate::types::SQLiteBind;
use crate::values::{SQLiteSQL, SQLiteValue};

/// Builds `DELETE FROM t [WHERE ...]`. Without a filter it empties the table.
pub struct DeleteBuilder<T> {
    filter: Option<SQLiteSQL<'static>>,
    table: PhantomData<fn() -> T>,
}

impl<T: SQLiteTable> DeleteBuilder<T> {
    pub fn new() -> Self {
        Self {
            filter: None,
            table: PhantomData,
        }
    }

    /// Sets the filter, replacing any earlier one. Only columns of `T` may appear.
    pub fn r#where<C, W>(mut self, condition: Condition<C>) -> Self
    where
        C: SubsetOf<Source<T>, W>,
    {
        self.filter = Some(condition.into_sql());
        self
    }

    /// Deletes the record whose primary key equals `key`.
    pub fn where_key<V>(mut self, key: V) -> Self
    where
        T: HasPrimaryKey,
        V: SQLiteBind,
        V::SQLType: Compatible<SQLTypeOf<T::PrimaryKey>>,
    {
        self.filter = Some(<T::PrimaryKey as Default>::default().eq(key).into_sql());
        self
    }

    pub fn to_sql(&self) -> SQLiteSQL<'static> {
        let sql = SQLiteSQL::text("DELETE FROM").append(SQLiteSQL::table(T::NAME));
        match &self.filter {
            Some(filter) => sql.push("WHERE").append(filter.clone()),
            None => sql,
        }
    }
}

impl<T: SQLiteTable> Default for DeleteBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for DeleteBuilder<T> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            table: PhantomData,
        }
    }
}

impl<T: SQLiteTable> std::fmt::Debug for DeleteBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteBuilder")
            .field("sql", &self.to_sql().sql())
            .finish()
    }
}

impl<T: SQLiteTable> ToSQL<'static, SQLiteValue<'static>> for DeleteBuilder<T> {
    fn to_sql(&self) -> SQLiteSQL<'static> {
        DeleteBuilder::to_sql(self)
    }
}
