use crate::traits::SQLiteTable;
use crate::values::SQLiteSQL;

/// Highest number of bound parameters SQLite accepts in one statement.
pub const MAX_PARAMETERS: usize = 32766;

/// Builds an `INSERT` of one or more records of `T`.
///
/// All rows of one statement share a column list: either every column, or
/// every column except an auto-increment key left at its default so the
/// engine assigns it.
#[derive(Debug)]
pub struct InsertBuilder<'a, T> {
    rows: &'a [T],
    include_key: bool,
}

impl<'a, T> Clone for InsertBuilder<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for InsertBuilder<'a, T> {}

impl<'a, T: SQLiteTable> InsertBuilder<'a, T> {
    /// Insert of a single record.
    pub fn single(record: &'a T) -> Self {
        Self {
            rows: std::slice::from_ref(record),
            include_key: !record.auto_key_unset(),
        }
    }

    /// Splits `records` into multi-row statements, keeping their order.
    ///
    /// Consecutive records that agree on whether the key is bound share a
    /// statement, up to [`MAX_PARAMETERS`] bound values.
    pub fn batches(records: &'a [T]) -> Vec<Self> {
        let mut batches = Vec::new();
        let mut start = 0;
        while start < records.len() {
            let include_key = !records[start].auto_key_unset();
            let max_rows = Self::max_rows(include_key);
            let mut end = start + 1;
            while end < records.len()
                && end - start < max_rows
                && !records[end].auto_key_unset() == include_key
            {
                end += 1;
            }
            batches.push(Self {
                rows: &records[start..end],
                include_key,
            });
            start = end;
        }
        batches
    }

    fn max_rows(include_key: bool) -> usize {
        match Self::skipped(include_key) {
            // A table holding only its key inserts with DEFAULT VALUES, one row at a time.
            Some(_) if T::COLUMNS.len() == 1 => 1,
            Some(_) => MAX_PARAMETERS / (T::COLUMNS.len() - 1),
            None => MAX_PARAMETERS / T::COLUMNS.len().max(1),
        }
    }

    fn skipped(include_key: bool) -> Option<usize> {
        if include_key { None } else { T::PRIMARY_KEY }
    }

    pub fn rows(&self) -> &'a [T] {
        self.rows
    }

    /// False when the engine assigns the key of every row.
    pub fn includes_key(&self) -> bool {
        self.include_key
    }

    pub fn to_sql(&self) -> SQLiteSQL<'a> {
        let skipped = Self::skipped(self.include_key);
        let keep = |index: &usize| Some(*index) != skipped;

        let sql = SQLiteSQL::text("INSERT INTO").append(SQLiteSQL::table(T::NAME));
        let columns: Vec<SQLiteSQL<'a>> = T::COLUMNS
            .iter()
            .enumerate()
            .filter(|(index, _)| keep(index))
            .map(|(_, column)| SQLiteSQL::ident(column.name))
            .collect();
        if columns.is_empty() {
            return sql.push("DEFAULT VALUES");
        }

        let rows = self.rows.iter().map(|record| {
            let values = record
                .values()
                .into_iter()
                .enumerate()
                .filter(|(index, _)| keep(index))
                .map(|(_, value)| value);
            SQLiteSQL::parameters(values).parens()
        });

        sql.append(SQLiteSQL::join(columns, ", ").parens())
            .push("VALUES")
            .append(SQLiteSQL::join(rows, ", "))
    }
}
