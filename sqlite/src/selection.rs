//! Selections describe what a query returns and how to rebuild it from a
//! flat result row.
//!
//! A selection is a column, a whole record, [`Optional`] of either, or a
//! tuple of selections. Each one knows its width in columns; a query lays
//! its top-level selections side by side and records where each starts in
//! a [`RowLayout`].

use std::marker::PhantomData;

use quarry_core::{Concat, Result, SQL, TypeSet};
use rusqlite::Row;
use rusqlite::types::ValueRef;
use smallvec::SmallVec;

use crate::traits::{SQLiteColumn, SQLiteTable};
use crate::types::decode_column;
use crate::values::SQLiteSQL;

/// Something a `SELECT` can project and decode.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be selected",
    label = "expected a column, a table record, `Optional<_>` or a tuple of these"
)]
pub trait Selection {
    type Output;
    /// The table the query reads `FROM`.
    type Table: SQLiteTable;
    /// Every table the selection reads columns from.
    type Tables: TypeSet;

    const COLUMN_COUNT: usize;

    /// Pushes the projected, table-qualified columns.
    fn columns(out: &mut Vec<SQLiteSQL<'static>>);

    /// Decodes the selection from the columns starting at `offset`.
    fn decode(row: &Row<'_>, offset: usize) -> Result<Self::Output>;

    /// True when the columns at `offset` describe no value, as produced by
    /// an outer join that found no match.
    fn is_absent(row: &Row<'_>, offset: usize) -> Result<bool>;

    /// Widths of the top-level parts of this selection.
    fn widths(out: &mut SmallVec<[usize; 8]>) {
        out.push(Self::COLUMN_COUNT);
    }

    /// Decodes a whole result row using precomputed offsets.
    fn decode_row(row: &Row<'_>, layout: &RowLayout) -> Result<Self::Output> {
        Self::decode(row, layout.offsets.first().copied().unwrap_or(0))
    }
}

/// A record type that selects and decodes as itself.
pub trait Record: SQLiteTable + Selection<Output = Self, Table = Self> {}

impl<T: SQLiteTable + Selection<Output = T, Table = T>> Record for T {}

/// Start offset of each top-level selection in a result row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowLayout {
    offsets: SmallVec<[usize; 8]>,
}

impl RowLayout {
    pub fn of<S: Selection + ?Sized>() -> Self {
        let mut widths = SmallVec::<[usize; 8]>::new();
        S::widths(&mut widths);

        let mut next = 0;
        let offsets = widths
            .iter()
            .map(|width| {
                let start = next;
                next += width;
                start
            })
            .collect();
        Self { offsets }
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }
}

/// `S`, or nothing when its columns are absent.
pub struct Optional<S>(PhantomData<S>);

impl<S: Selection> Selection for Optional<S> {
    type Output = Option<S::Output>;
    type Table = S::Table;
    type Tables = S::Tables;

    const COLUMN_COUNT: usize = S::COLUMN_COUNT;

    fn columns(out: &mut Vec<SQLiteSQL<'static>>) {
        S::columns(out);
    }

    fn decode(row: &Row<'_>, offset: usize) -> Result<Self::Output> {
        if S::is_absent(row, offset)? {
            Ok(None)
        } else {
            S::decode(row, offset).map(Some)
        }
    }

    fn is_absent(row: &Row<'_>, offset: usize) -> Result<bool> {
        S::is_absent(row, offset)
    }
}

fn is_null(row: &Row<'_>, index: usize) -> Result<bool> {
    Ok(matches!(row.get_ref(index)?, ValueRef::Null))
}

#[doc(hidden)]
pub fn record_columns<T: SQLiteTable>(out: &mut Vec<SQLiteSQL<'static>>) {
    out.extend(T::COLUMNS.iter().map(|column| SQL::column(T::NAME, column.name)));
}

/// A record is absent when its primary key is NULL, or when every column
/// is NULL if the table has no primary key.
#[doc(hidden)]
pub fn record_is_absent<T: SQLiteTable>(row: &Row<'_>, offset: usize) -> Result<bool> {
    if let Some(key) = T::PRIMARY_KEY {
        return is_null(row, offset + key);
    }
    for index in 0..T::COLUMNS.len() {
        if !is_null(row, offset + index)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[doc(hidden)]
pub fn column_projection<C: SQLiteColumn>(out: &mut Vec<SQLiteSQL<'static>>) {
    out.push(SQL::column(<C::Table as SQLiteTable>::NAME, C::NAME));
}

#[doc(hidden)]
pub fn column_decode<C: SQLiteColumn>(row: &Row<'_>, offset: usize) -> Result<C::Value> {
    decode_column::<C::Value>(row, offset)
}

#[doc(hidden)]
pub fn column_is_absent(row: &Row<'_>, offset: usize) -> Result<bool> {
    is_null(row, offset)
}

/// Implements [`Selection`] for a record type.
#[macro_export]
macro_rules! impl_record_selection {
    ($table:ty) => {
        impl $crate::selection::Selection for $table {
            type Output = $table;
            type Table = $table;
            type Tables = $crate::__core::Cons<$table, $crate::__core::Nil>;

            const COLUMN_COUNT: usize =
                <$table as $crate::traits::SQLiteTable>::COLUMNS.len();

            fn columns(out: &mut ::std::vec::Vec<$crate::values::SQLiteSQL<'static>>) {
                $crate::selection::record_columns::<$table>(out)
            }

            fn decode(
                row: &$crate::rusqlite::Row<'_>,
                offset: usize,
            ) -> $crate::__core::Result<Self::Output> {
                <$table as $crate::traits::SQLiteTable>::from_row_at(row, offset)
            }

            fn is_absent(
                row: &$crate::rusqlite::Row<'_>,
                offset: usize,
            ) -> $crate::__core::Result<bool> {
                $crate::selection::record_is_absent::<$table>(row, offset)
            }
        }
    };
}

/// Implements [`Selection`] for a column type.
#[macro_export]
macro_rules! impl_column_selection {
    ($column:ty) => {
        impl $crate::selection::Selection for $column {
            type Output = <$column as $crate::traits::SQLiteColumn>::Value;
            type Table = <$column as $crate::traits::SQLiteColumn>::Table;
            type Tables = $crate::__core::Cons<
                <$column as $crate::traits::SQLiteColumn>::Table,
                $crate::__core::Nil,
            >;

            const COLUMN_COUNT: usize = 1;

            fn columns(out: &mut ::std::vec::Vec<$crate::values::SQLiteSQL<'static>>) {
                $crate::selection::column_projection::<$column>(out)
            }

            fn decode(
                row: &$crate::rusqlite::Row<'_>,
                offset: usize,
            ) -> $crate::__core::Result<Self::Output> {
                $crate::selection::column_decode::<$column>(row, offset)
            }

            fn is_absent(
                row: &$crate::rusqlite::Row<'_>,
                offset: usize,
            ) -> $crate::__core::Result<bool> {
                $crate::selection::column_is_absent(row, offset)
            }
        }
    };
}

macro_rules! tuple_tables {
    ($head:ident) => { $head::Tables };
    ($head:ident $(, $tail:ident)+) => { Concat<$head::Tables, tuple_tables!($($tail),+)> };
}

macro_rules! tuple_selection {
    ($head:ident $(, $tail:ident)*) => {
        impl<$head: Selection, $($tail: Selection),*> Selection for ($head, $($tail,)*) {
            type Output = ($head::Output, $($tail::Output,)*);
            type Table = $head::Table;
            type Tables = tuple_tables!($head $(, $tail)*);

            const COLUMN_COUNT: usize = $head::COLUMN_COUNT $(+ $tail::COLUMN_COUNT)*;

            fn columns(out: &mut Vec<SQLiteSQL<'static>>) {
                $head::columns(out);
                $($tail::columns(out);)*
            }

            #[allow(unused_assignments)]
            fn decode(row: &Row<'_>, mut offset: usize) -> Result<Self::Output> {
                Ok((
                    {
                        let value = $head::decode(row, offset)?;
                        offset += $head::COLUMN_COUNT;
                        value
                    },
                    $({
                        let value = $tail::decode(row, offset)?;
                        offset += $tail::COLUMN_COUNT;
                        value
                    },)*
                ))
            }

            #[allow(unused_assignments)]
            fn is_absent(row: &Row<'_>, mut offset: usize) -> Result<bool> {
                if !$head::is_absent(row, offset)? {
                    return Ok(false);
                }
                offset += $head::COLUMN_COUNT;
                $(
                    if !$tail::is_absent(row, offset)? {
                        return Ok(false);
                    }
                    offset += $tail::COLUMN_COUNT;
                )*
                Ok(true)
            }

            fn widths(out: &mut SmallVec<[usize; 8]>) {
                out.push($head::COLUMN_COUNT);
                $(out.push($tail::COLUMN_COUNT);)*
            }

            fn decode_row(row: &Row<'_>, layout: &RowLayout) -> Result<Self::Output> {
                let mut offsets = layout.offsets().iter().copied();
                Ok((
                    $head::decode(row, offsets.next().unwrap_or(0))?,
                    $($tail::decode(row, offsets.next().unwrap_or(0))?,)*
                ))
            }
        }
    };
}

tuple_selection!(A);
tuple_selection!(A, B);
tuple_selection!(A, B, C);
tuple_selection!(A, B, C, D);
tuple_selection!(A, B, C, D, E);
tuple_selection!(A, B, C, D, E, F);
tuple_selection!(A, B, C, D, E, F, G);
tuple_selection!(A, B, C, D, E, F, G, H);
