use quarry_core::Result;
use quarry_sqlite::RowLayout;
use rusqlite::{Row, Rows};

/// Lazy, single-pass iterator over the decoded rows of a running query.
///
/// Each item is one row's result. After the first error the iterator is
/// exhausted. Dropping it resets the statement.
pub struct RecordIterator<'s, T> {
    rows: Rows<'s>,
    decode: fn(&Row<'_>, &RowLayout) -> Result<T>,
    layout: RowLayout,
    done: bool,
}

impl<'s, T> RecordIterator<'s, T> {
    pub(crate) fn new(
        rows: Rows<'s>,
        decode: fn(&Row<'_>, &RowLayout) -> Result<T>,
        layout: RowLayout,
    ) -> Self {
        Self {
            rows,
            decode,
            layout,
            done: false,
        }
    }

    /// Drains the remaining rows, stopping at the first error.
    #[allow(clippy::wrong_self_convention)]
    pub fn to_vec(self) -> Result<Vec<T>> {
        self.collect()
    }
}

impl<T> Iterator for RecordIterator<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item = match self.rows.next() {
            Ok(Some(row)) => (self.decode)(row, &self.layout),
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(err) => Err(err.into()),
        };
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}
