//! Typed `WHERE` / `ON` predicates.
//!
//! A [`Condition`] carries its rendered SQL and bound values together with a
//! type-level list of the tables it reads from. Query builders only accept a
//! condition whose tables are all part of the query, so referencing a column
//! of a table that was never joined fails to compile.

use std::fmt;
use std::marker::PhantomData;

use quarry_core::types::{Compatible, Textual};
use quarry_core::{Concat, Cons, Nil, SQL, ToSQL, TypeSet};

use crate::traits::{SQLiteColumn, SQLiteTable};
use crate::types::{SQLiteBind, SQLiteType};
use crate::values::{SQLiteSQL, SQLiteValue};

/// Tables referenced by a single column.
pub type TablesOf<C> = Cons<<C as SQLiteColumn>::Table, Nil>;

/// Tables referenced by a comparison between two columns.
pub type TablesOfPair<A, B> = Cons<<A as SQLiteColumn>::Table, Cons<<B as SQLiteColumn>::Table, Nil>>;

/// SQL type marker of a column's value.
pub type SQLTypeOf<C> = <<C as SQLiteColumn>::Value as SQLiteType>::SQLType;

/// A boolean predicate over the tables in `Tables`.
pub struct Condition<Tables> {
    sql: SQLiteSQL<'static>,
    tables: PhantomData<fn() -> Tables>,
}

impl<Tables> Condition<Tables> {
    fn new(sql: SQLiteSQL<'static>) -> Self {
        Self {
            sql,
            tables: PhantomData,
        }
    }

    /// `(self) AND (other)`
    pub fn and<Rhs>(self, other: Condition<Rhs>) -> Condition<Concat<Tables, Rhs>>
    where
        Tables: TypeSet,
        Rhs: TypeSet,
    {
        Condition::new(self.sql.parens().push("AND").append(other.sql.parens()))
    }

    /// `(self) OR (other)`
    pub fn or<Rhs>(self, other: Condition<Rhs>) -> Condition<Concat<Tables, Rhs>>
    where
        Tables: TypeSet,
        Rhs: TypeSet,
    {
        Condition::new(self.sql.parens().push("OR").append(other.sql.parens()))
    }

    pub fn into_sql(self) -> SQLiteSQL<'static> {
        self.sql
    }
}

impl<Tables> Clone for Condition<Tables> {
    fn clone(&self) -> Self {
        Condition::new(self.sql.clone())
    }
}

impl<Tables> fmt::Debug for Condition<Tables> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("sql", &self.sql.sql())
            .field("params", &self.sql.params())
            .finish()
    }
}

impl<Tables> ToSQL<'static, SQLiteValue<'static>> for Condition<Tables> {
    fn to_sql(&self) -> SQLiteSQL<'static> {
        self.sql.clone()
    }

    fn into_sql(self) -> SQLiteSQL<'static> {
        self.sql
    }
}

fn column<C: SQLiteColumn>() -> SQLiteSQL<'static> {
    SQL::column(<C::Table as SQLiteTable>::NAME, C::NAME)
}

fn compare<C: SQLiteColumn>(op: &'static str, value: SQLiteValue<'static>) -> Condition<TablesOf<C>> {
    Condition::new(column::<C>().push(op).append(SQLiteSQL::parameter(value)))
}

fn compare_columns<A: SQLiteColumn, B: SQLiteColumn>(
    op: &'static str,
) -> Condition<TablesOfPair<A, B>> {
    Condition::new(column::<A>().push(op).append(column::<B>()))
}

fn list<C, I>(op: &'static str, values: I) -> Condition<TablesOf<C>>
where
    C: SQLiteColumn,
    I: IntoIterator,
    I::Item: SQLiteBind,
{
    let values: SQLiteSQL<'static> = SQL::parameters(values.into_iter().map(SQLiteBind::into_value));
    Condition::new(column::<C>().push(op).append(values.parens()))
}

macro_rules! comparison {
    ($($(#[$meta:meta])* $name:ident => $op:literal),+ $(,)?) => {
        $(
            $(#[$meta])*
            fn $name<V>(self, value: V) -> Condition<TablesOf<Self>>
            where
                V: SQLiteBind,
                V::SQLType: Compatible<SQLTypeOf<Self>>,
            {
                compare::<Self>($op, value.into_value())
            }
        )+
    };
}

macro_rules! pattern {
    ($($name:ident => $op:literal),+ $(,)?) => {
        $(
            fn $name<V>(self, pattern: V) -> Condition<TablesOf<Self>>
            where
                V: SQLiteBind,
                V::SQLType: Textual,
                SQLTypeOf<Self>: Textual,
            {
                compare::<Self>($op, pattern.into_value())
            }
        )+
    };
}

macro_rules! column_comparison {
    ($($name:ident => $op:literal),+ $(,)?) => {
        $(
            fn $name<B>(self, _other: B) -> Condition<TablesOfPair<Self, B>>
            where
                B: SQLiteColumn,
                SQLTypeOf<B>: Compatible<SQLTypeOf<Self>>,
            {
                compare_columns::<Self, B>($op)
            }
        )+
    };
}

/// Predicate constructors available on every column.
///
/// ```ignore
/// UserAge.gt(18).and(UserName.like("A%"))
/// ```
pub trait ColumnExpr: SQLiteColumn {
    comparison! {
        /// `col = ?`
        eq => "=",
        /// `col != ?`
        ne => "!=",
        lt => "<",
        lte => "<=",
        gt => ">",
        gte => ">=",
    }

    pattern! {
        like => "LIKE",
        not_like => "NOT LIKE",
        glob => "GLOB",
        not_glob => "NOT GLOB",
    }

    column_comparison! {
        eq_col => "=",
        ne_col => "!=",
        lt_col => "<",
        lte_col => "<=",
        gt_col => ">",
        gte_col => ">=",
    }

    /// `col IN (?, ?, ...)`, one placeholder per value.
    fn in_list<I>(self, values: I) -> Condition<TablesOf<Self>>
    where
        I: IntoIterator,
        I::Item: SQLiteBind,
        <I::Item as SQLiteBind>::SQLType: Compatible<SQLTypeOf<Self>>,
    {
        list::<Self, I>("IN", values)
    }

    /// `col NOT IN (?, ?, ...)`
    fn not_in_list<I>(self, values: I) -> Condition<TablesOf<Self>>
    where
        I: IntoIterator,
        I::Item: SQLiteBind,
        <I::Item as SQLiteBind>::SQLType: Compatible<SQLTypeOf<Self>>,
    {
        list::<Self, I>("NOT IN", values)
    }

    fn is_null(self) -> Condition<TablesOf<Self>> {
        Condition::new(column::<Self>().push("IS NULL"))
    }

    fn is_not_null(self) -> Condition<TablesOf<Self>> {
        Condition::new(column::<Self>().push("IS NOT NULL"))
    }
}

impl<C: SQLiteColumn> ColumnExpr for C {}
