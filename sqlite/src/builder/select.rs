use std::marker::PhantomData;

use paste::paste;
use quarry_core::types::Compatible;
use quarry_core::{Cons, Contains, OrderBy, QuarryError, Result, SubsetOf, ToSQL};
use smallvec::SmallVec;

use super::Source;
use crate::expression::{ColumnExpr, Condition, SQLTypeOf};
use crate::selection::{RowLayout, Selection};
use crate::traits::{HasPrimaryKey, SQLiteColumn, SQLiteTable};
use crate::types::SQLiteBind;
use crate::values::{SQLiteSQL, SQLiteValue};

#[doc(hidden)]
macro_rules! join_impl {
    ($($kind:ident => $keyword:literal),+ $(,)?) => {
        paste! {
            $(
                #[doc = concat!("Starts a `", $keyword, "` against `U`; finish it with [`JoinOn::on`].")]
                #[inline]
                pub fn [<$kind _join>]<U: SQLiteTable>(self) -> JoinOn<S, Sources, U> {
                    self.pending_join($keyword)
                }
            )+
        }
    };
}

/// Builds a SELECT of `S` over the tables in `Sources`.
///
/// `Sources` starts as the FROM table of `S` and grows with every join.
/// Every builder method consumes the builder; rendering borrows it, so one
/// builder renders as often as needed and each render reflects its state at
/// that moment.
///
/// ```ignore
/// let query = SelectBuilder::<(User, Optional<Pet>), _>::new()
///     .left_join::<Pet>()
///     .on(PetOwner.eq_col(UserId))
///     .r#where(UserAge.gte(18))
///     .order_by(UserName, OrderBy::Asc)
///     .limit(10);
/// ```
pub struct SelectBuilder<S, Sources> {
    joins: SmallVec<[SQLiteSQL<'static>; 2]>,
    filter: Option<SQLiteSQL<'static>>,
    group_by: SmallVec<[SQLiteSQL<'static>; 2]>,
    order_by: SmallVec<[SQLiteSQL<'static>; 2]>,
    limit: Option<u64>,
    offset: Option<u64>,
    layout: RowLayout,
    marker: PhantomData<fn() -> (S, Sources)>,
}

impl<S: Selection> SelectBuilder<S, Source<S::Table>> {
    pub fn new() -> Self {
        Self {
            joins: SmallVec::new(),
            filter: None,
            group_by: SmallVec::new(),
            order_by: SmallVec::new(),
            limit: None,
            offset: None,
            layout: RowLayout::of::<S>(),
            marker: PhantomData,
        }
    }
}

impl<S: Selection> Default for SelectBuilder<S, Source<S::Table>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, Sources> Clone for SelectBuilder<S, Sources> {
    fn clone(&self) -> Self {
        Self {
            joins: self.joins.clone(),
            filter: self.filter.clone(),
            group_by: self.group_by.clone(),
            order_by: self.order_by.clone(),
            limit: self.limit,
            offset: self.offset,
            layout: self.layout.clone(),
            marker: PhantomData,
        }
    }
}

impl<S, Sources> std::fmt::Debug for SelectBuilder<S, Sources>
where
    S: Selection,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectBuilder")
            .field("sql", &self.to_sql().sql())
            .field("layout", &self.layout)
            .finish()
    }
}

impl<S: Selection, Sources> SelectBuilder<S, Sources> {
    /// Sets the WHERE clause, replacing any earlier one.
    #[inline]
    pub fn r#where<T, W>(mut self, condition: Condition<T>) -> Self
    where
        T: SubsetOf<Sources, W>,
    {
        self.filter = Some(condition.into_sql());
        self
    }

    /// Filters on the primary key of the FROM table.
    pub fn where_key<V>(mut self, key: V) -> Self
    where
        S::Table: HasPrimaryKey,
        V: SQLiteBind,
        V::SQLType: Compatible<SQLTypeOf<<S::Table as HasPrimaryKey>::PrimaryKey>>,
    {
        let column = <<S::Table as HasPrimaryKey>::PrimaryKey as Default>::default();
        self.filter = Some(column.eq(key).into_sql());
        self
    }

    /// Starts a plain `JOIN` against `U`; finish it with [`JoinOn::on`].
    #[inline]
    pub fn join<U: SQLiteTable>(self) -> JoinOn<S, Sources, U> {
        self.pending_join("JOIN")
    }

    join_impl! {
        inner => "INNER JOIN",
        left => "LEFT JOIN",
        left_outer => "LEFT OUTER JOIN",
        cross => "CROSS JOIN",
    }

    /// Appends a GROUP BY column; any table of the query may be used.
    pub fn group_by<C, W>(mut self, _column: C) -> Self
    where
        C: SQLiteColumn,
        Sources: Contains<C::Table, W>,
    {
        self.group_by.push(SQLiteSQL::column(
            <C::Table as SQLiteTable>::NAME,
            C::NAME,
        ));
        self
    }

    /// Appends an ORDER BY key on a column of the FROM table.
    pub fn order_by<C>(mut self, _column: C, order: OrderBy) -> Self
    where
        C: SQLiteColumn<Table = S::Table>,
    {
        self.order_by.push(
            SQLiteSQL::column(<C::Table as SQLiteTable>::NAME, C::NAME).push(order.as_str()),
        );
        self
    }

    #[inline]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[inline]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// `LIMIT limit OFFSET offset`
    #[inline]
    pub fn limit_offset(self, limit: u64, offset: u64) -> Self {
        self.limit(limit).offset(offset)
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }

    /// Column offsets of each top-level selection, computed at construction.
    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    pub fn to_sql(&self) -> SQLiteSQL<'static> {
        self.render(self.limit)
    }

    /// Renders the statement for fetching a single row.
    ///
    /// Adds `LIMIT 1` to this render only; an explicit limit is a usage error.
    pub fn one_sql(&self) -> Result<SQLiteSQL<'static>> {
        if self.limit.is_some() {
            return Err(QuarryError::usage(
                "one() cannot be called on a query with an explicit limit",
            ));
        }
        Ok(self.render(Some(1)))
    }

    fn render(&self, limit: Option<u64>) -> SQLiteSQL<'static> {
        let mut columns = Vec::with_capacity(S::COLUMN_COUNT);
        S::columns(&mut columns);

        let mut sql = SQLiteSQL::text("SELECT")
            .append(SQLiteSQL::join(columns, ", "))
            .push("FROM")
            .append(SQLiteSQL::table(<S::Table as SQLiteTable>::NAME));

        for join in &self.joins {
            sql = sql.append(join.clone());
        }
        if let Some(filter) = &self.filter {
            sql = sql.push("WHERE").append(filter.clone());
        }
        if !self.group_by.is_empty() {
            sql = sql
                .push("GROUP BY")
                .append(SQLiteSQL::join(&self.group_by, ", "));
        }
        if !self.order_by.is_empty() {
            sql = sql
                .push("ORDER BY")
                .append(SQLiteSQL::join(&self.order_by, ", "));
        }

        match (limit, self.offset) {
            (Some(limit), Some(offset)) => sql
                .push("LIMIT")
                .append_raw(limit.to_string())
                .push("OFFSET")
                .append_raw(offset.to_string()),
            (Some(limit), None) => sql.push("LIMIT").append_raw(limit.to_string()),
            (None, Some(offset)) => sql
                .push("LIMIT -1 OFFSET")
                .append_raw(offset.to_string()),
            (None, None) => sql,
        }
    }

    fn pending_join<U: SQLiteTable>(self, keyword: &'static str) -> JoinOn<S, Sources, U> {
        JoinOn {
            builder: self,
            keyword,
            table: PhantomData,
        }
    }

    fn retype<Next>(self) -> SelectBuilder<S, Next> {
        SelectBuilder {
            joins: self.joins,
            filter: self.filter,
            group_by: self.group_by,
            order_by: self.order_by,
            limit: self.limit,
            offset: self.offset,
            layout: self.layout,
            marker: PhantomData,
        }
    }
}

impl<S: Selection, Sources> ToSQL<'static, SQLiteValue<'static>> for SelectBuilder<S, Sources> {
    fn to_sql(&self) -> SQLiteSQL<'static> {
        self.render(self.limit)
    }
}

/// A join waiting for its `ON` condition.
pub struct JoinOn<S, Sources, U> {
    builder: SelectBuilder<S, Sources>,
    keyword: &'static str,
    table: PhantomData<fn() -> U>,
}

impl<S: Selection, Sources, U: SQLiteTable> JoinOn<S, Sources, U> {
    /// Completes the join. The condition may reference `U` and any table
    /// already in the query.
    pub fn on<T, W>(self, condition: Condition<T>) -> SelectBuilder<S, Cons<U, Sources>>
    where
        T: SubsetOf<Cons<U, Sources>, W>,
    {
        let clause = SQLiteSQL::text(self.keyword)
            .append(SQLiteSQL::table(U::NAME))
            .push("ON")
            .append(condition.into_sql());
        let mut builder = self.builder.retype::<Cons<U, Sources>>();
        builder.joins.push(clause);
        builder
    }
}
