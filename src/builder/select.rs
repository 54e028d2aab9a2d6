use paste::paste;
use quarry_core::types::Compatible;
use quarry_core::{Cons, Contains, OrderBy, Result, SubsetOf};
use quarry_sqlite::builder::{JoinOn, Source};
use quarry_sqlite::expression::SQLTypeOf;
use quarry_sqlite::{
    Condition, HasPrimaryKey, RowLayout, SQLiteBind, SQLiteColumn, SQLiteSQL, SQLiteTable,
    SelectBuilder, Selection,
};
use rusqlite::{CachedStatement, Connection, params_from_iter};

use crate::rows::RecordIterator;

macro_rules! join_query_impl {
    ($($kind:ident),+ $(,)?) => {
        paste! {
            $(
                #[inline]
                pub fn [<$kind _join>]<U: SQLiteTable>(self) -> JoinQuery<'c, S, Sources, U> {
                    JoinQuery {
                        conn: self.conn,
                        join: self.builder.[<$kind _join>]::<U>(),
                    }
                }
            )+
        }
    };
}

/// A SELECT bound to a connection.
///
/// Builder methods consume the query and return it; [`one`](Self::one) and
/// [`many`](Self::many) borrow it, so the same query can run again and each
/// run sees the builder as it is at that moment.
///
/// `many` keeps its prepared statement in the query, and the returned
/// [`RecordIterator`] borrows it. The statement goes back to the
/// connection's cache when the query is dropped or modified.
pub struct SelectQuery<'c, S, Sources> {
    conn: &'c Connection,
    builder: SelectBuilder<S, Sources>,
    statement: Option<CachedStatement<'c>>,
}

impl<'c, S: Selection> SelectQuery<'c, S, Source<S::Table>> {
    pub(crate) fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            builder: SelectBuilder::new(),
            statement: None,
        }
    }
}

impl<'c, S: Selection, Sources> SelectQuery<'c, S, Sources> {
    fn with_builder<Next>(
        conn: &'c Connection,
        builder: SelectBuilder<S, Next>,
    ) -> SelectQuery<'c, S, Next> {
        SelectQuery {
            conn,
            builder,
            statement: None,
        }
    }

    #[inline]
    pub fn r#where<T, W>(self, condition: Condition<T>) -> Self
    where
        T: SubsetOf<Sources, W>,
    {
        Self::with_builder(self.conn, self.builder.r#where(condition))
    }

    /// Filters on the primary key of the FROM table.
    #[inline]
    pub fn where_key<V>(self, key: V) -> Self
    where
        S::Table: HasPrimaryKey,
        V: SQLiteBind,
        V::SQLType: Compatible<SQLTypeOf<<S::Table as HasPrimaryKey>::PrimaryKey>>,
    {
        Self::with_builder(self.conn, self.builder.where_key(key))
    }

    /// Starts a plain `JOIN`; finish it with [`JoinQuery::on`].
    #[inline]
    pub fn join<U: SQLiteTable>(self) -> JoinQuery<'c, S, Sources, U> {
        JoinQuery {
            conn: self.conn,
            join: self.builder.join::<U>(),
        }
    }

    join_query_impl!(inner, left, left_outer, cross);

    #[inline]
    pub fn group_by<C, W>(self, column: C) -> Self
    where
        C: SQLiteColumn,
        Sources: Contains<C::Table, W>,
    {
        Self::with_builder(self.conn, self.builder.group_by(column))
    }

    #[inline]
    pub fn order_by<C>(self, column: C, order: OrderBy) -> Self
    where
        C: SQLiteColumn<Table = S::Table>,
    {
        Self::with_builder(self.conn, self.builder.order_by(column, order))
    }

    #[inline]
    pub fn limit(self, limit: u64) -> Self {
        Self::with_builder(self.conn, self.builder.limit(limit))
    }

    #[inline]
    pub fn offset(self, offset: u64) -> Self {
        Self::with_builder(self.conn, self.builder.offset(offset))
    }

    #[inline]
    pub fn limit_offset(self, limit: u64, offset: u64) -> Self {
        Self::with_builder(self.conn, self.builder.limit_offset(limit, offset))
    }

    pub fn builder(&self) -> &SelectBuilder<S, Sources> {
        &self.builder
    }

    pub fn layout(&self) -> &RowLayout {
        self.builder.layout()
    }

    pub fn to_sql(&self) -> SQLiteSQL<'static> {
        self.builder.to_sql()
    }

    /// Fetches the first row, or `None` when nothing matches.
    ///
    /// Fails with a usage error when the query has an explicit limit.
    pub fn one<W>(&self) -> Result<Option<S::Output>>
    where
        S::Tables: SubsetOf<Sources, W>,
    {
        self.fetch_one()
    }

    /// Runs the query and returns a lazy iterator over the decoded rows.
    pub fn many<W>(&mut self) -> Result<RecordIterator<'_, S::Output>>
    where
        S::Tables: SubsetOf<Sources, W>,
    {
        self.fetch_many()
    }

    /// [`one`](Self::one) for queries whose selection reads only the FROM
    /// table.
    pub(crate) fn fetch_one(&self) -> Result<Option<S::Output>> {
        let sql = self.builder.one_sql()?;
        let text = sql.sql();
        let params = sql.params();
        quarry_core::quarry_trace_query!(&text, params.len());

        let mut statement = self.conn.prepare_cached(&text)?;
        let mut rows = statement.query(params_from_iter(params))?;
        let row = rows.next()?;
        match row {
            Some(row) => S::decode_row(row, self.builder.layout()).map(Some),
            None => Ok(None),
        }
    }

    fn fetch_many(&mut self) -> Result<RecordIterator<'_, S::Output>> {
        let sql = self.builder.to_sql();
        let text = sql.sql();
        let params = sql.params();
        quarry_core::quarry_trace_query!(&text, params.len());

        let statement = match &mut self.statement {
            Some(statement) => statement,
            slot => slot.insert(self.conn.prepare_cached(&text)?),
        };
        let rows = statement.query(params_from_iter(params))?;
        Ok(RecordIterator::new(
            rows,
            S::decode_row,
            self.builder.layout().clone(),
        ))
    }
}

impl<S: Selection, Sources> std::fmt::Debug for SelectQuery<'_, S, Sources> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectQuery")
            .field("builder", &self.builder)
            .field("prepared", &self.statement.is_some())
            .finish()
    }
}

/// A join waiting for its `ON` condition.
pub struct JoinQuery<'c, S, Sources, U> {
    conn: &'c Connection,
    join: JoinOn<S, Sources, U>,
}

impl<'c, S: Selection, Sources, U: SQLiteTable> JoinQuery<'c, S, Sources, U> {
    pub fn on<T, W>(self, condition: Condition<T>) -> SelectQuery<'c, S, Cons<U, Sources>>
    where
        T: SubsetOf<Cons<U, Sources>, W>,
    {
        SelectQuery {
            conn: self.conn,
            builder: self.join.on(condition),
            statement: None,
        }
    }
}
