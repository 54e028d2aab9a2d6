use compact_str::{CompactString, ToCompactString};
use smallvec::{SmallVec, smallvec};
use std::{borrow::Cow, fmt::Display};

use crate::{Param, Placeholder, ToSQL, traits::SQLParam};

/// A SQL chunk represents a part of an SQL statement.
#[derive(Clone)]
pub enum SQLChunk<'a, V: SQLParam + 'a> {
    Text(CompactString),
    Param(Param<'a, V>),
    SQL(Box<SQL<'a, V>>),
    /// A table reference: `` `table` ``
    Table(&'static str),
    /// A column reference qualified by its table: `` `table`.`column` ``
    Column {
        table: &'static str,
        name: &'static str,
    },
    /// A bare quoted identifier: `` `name` ``
    Ident(&'static str),
}

impl<'a, V: SQLParam + 'a> SQLChunk<'a, V> {
    /// Write chunk to buffer
    fn write_to_buffer(&self, buf: &mut CompactString) {
        match self {
            SQLChunk::Text(text) => buf.push_str(text),
            SQLChunk::Param(Param { placeholder, .. }) => {
                use std::fmt::Write;
                let _ = write!(buf, "{placeholder}");
            }
            SQLChunk::SQL(sql) => sql.write_sql(buf),
            SQLChunk::Table(name) | SQLChunk::Ident(name) => push_quoted(buf, name),
            SQLChunk::Column { table, name } => {
                push_quoted(buf, table);
                buf.push('.');
                push_quoted(buf, name);
            }
        }
    }

    fn first_char(&self) -> Option<char> {
        match self {
            SQLChunk::Text(t) => t.chars().next(),
            SQLChunk::SQL(sql) => sql.chunks.iter().find_map(SQLChunk::first_char),
            _ => Some('`'),
        }
    }

    fn last_char(&self) -> Option<char> {
        match self {
            SQLChunk::Text(t) => t.chars().last(),
            SQLChunk::SQL(sql) => sql.chunks.iter().rev().find_map(SQLChunk::last_char),
            SQLChunk::Param(_) => Some('?'),
            _ => Some('`'),
        }
    }
}

impl<'a, V: SQLParam + std::fmt::Debug> std::fmt::Debug for SQLChunk<'a, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SQLChunk::Text(text) => f.debug_tuple("Text").field(text).finish(),
            SQLChunk::Param(param) => f.debug_tuple("Param").field(param).finish(),
            SQLChunk::SQL(_) => f.debug_tuple("SQL").field(&"<nested>").finish(),
            SQLChunk::Table(table) => f.debug_tuple("Table").field(table).finish(),
            SQLChunk::Column { table, name } => f
                .debug_tuple("Column")
                .field(&format!("{table}.{name}"))
                .finish(),
            SQLChunk::Ident(name) => f.debug_tuple("Ident").field(name).finish(),
        }
    }
}

fn push_quoted(buf: &mut CompactString, ident: &str) {
    buf.push('`');
    for c in ident.chars() {
        if c == '`' {
            buf.push('`');
        }
        buf.push(c);
    }
    buf.push('`');
}

/// A SQL statement or fragment with parameters.
///
/// This type is used to build SQL statements with proper parameter handling.
/// It keeps track of both the SQL text and the parameters to be bound.
#[derive(Debug, Clone)]
pub struct SQL<'a, V: SQLParam> {
    /// The chunks that make up this SQL statement or fragment.
    pub chunks: SmallVec<[SQLChunk<'a, V>; 3]>,
}

impl<'a, V: SQLParam> SQL<'a, V> {
    /// Creates a new empty SQL fragment.
    pub const fn empty() -> Self {
        SQL {
            chunks: SmallVec::new_const(),
        }
    }

    /// Creates a fragment from static SQL text.
    pub fn text(text: &'static str) -> Self {
        Self {
            chunks: smallvec![SQLChunk::Text(CompactString::const_new(text))],
        }
    }

    /// Creates a new SQL fragment from a raw string.
    ///
    /// The string is treated as literal SQL text, not a parameter.
    pub fn raw<T: AsRef<str>>(sql: T) -> Self {
        Self {
            chunks: smallvec![SQLChunk::Text(sql.as_ref().to_compact_string())],
        }
    }

    /// Creates a new SQL fragment representing a parameter.
    ///
    /// A positional placeholder ('?') is rendered, and the provided value
    /// is stored for later binding. Accepts both owned and borrowed values.
    pub fn parameter(param: impl Into<Cow<'a, V>>) -> Self {
        Self {
            chunks: smallvec![SQLChunk::Param(Param {
                value: param.into(),
                placeholder: Placeholder::positional(),
            })],
        }
    }

    /// Creates a new SQL fragment representing a table.
    pub fn table(name: &'static str) -> Self {
        Self {
            chunks: smallvec![SQLChunk::Table(name)],
        }
    }

    /// Creates a table-qualified column reference.
    pub fn column(table: &'static str, name: &'static str) -> Self {
        Self {
            chunks: smallvec![SQLChunk::Column { table, name }],
        }
    }

    /// Creates an unqualified, quoted identifier.
    pub fn ident(name: &'static str) -> Self {
        Self {
            chunks: smallvec![SQLChunk::Ident(name)],
        }
    }

    /// Appends a raw string to this SQL fragment.
    ///
    /// The string is treated as literal SQL text, not a parameter.
    pub fn append_raw(mut self, sql: impl AsRef<str>) -> Self {
        self.chunks
            .push(SQLChunk::Text(sql.as_ref().to_compact_string()));
        self
    }

    /// Appends static SQL text.
    pub fn push(mut self, text: &'static str) -> Self {
        self.chunks
            .push(SQLChunk::Text(CompactString::const_new(text)));
        self
    }

    /// Appends another SQL fragment to this one.
    ///
    /// Both the SQL text and parameters are merged.
    pub fn append(mut self, other: impl Into<SQL<'a, V>>) -> Self {
        self.chunks.extend(other.into().chunks);
        self
    }

    /// Wraps this fragment in parentheses.
    pub fn parens(self) -> Self {
        SQL::text("(").append(self).push(")")
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Joins multiple SQL fragments with a separator.
    ///
    /// The separator is inserted between each fragment, but not before the first or after the last.
    pub fn join<T>(sqls: T, separator: &'static str) -> SQL<'a, V>
    where
        T: IntoIterator,
        T::Item: ToSQL<'a, V>,
    {
        let mut chunks = SmallVec::new();
        for (i, sql) in sqls.into_iter().enumerate() {
            if i > 0 {
                chunks.push(SQLChunk::Text(CompactString::const_new(separator)));
            }
            chunks.extend(sql.into_sql().chunks);
        }
        SQL { chunks }
    }

    /// Creates a comma-separated list of parameter placeholders with values: "?, ?, ?"
    pub fn parameters<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cow<'a, V>>,
    {
        let mut chunks = SmallVec::new();
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                chunks.push(SQLChunk::Text(CompactString::const_new(", ")));
            }
            chunks.push(SQLChunk::Param(Param::new(value)));
        }
        SQL { chunks }
    }

    /// Returns the SQL string represented by this SQL fragment, using placeholders for parameters.
    pub fn sql(&self) -> String {
        let mut buf = CompactString::with_capacity(self.estimate_capacity());
        self.write_sql(&mut buf);
        buf.into()
    }

    fn write_sql(&self, buf: &mut CompactString) {
        for (i, chunk) in self.chunks.iter().enumerate() {
            chunk.write_to_buffer(buf);
            if self.needs_space(i) {
                buf.push(' ');
            }
        }
    }

    fn estimate_capacity(&self) -> usize {
        self.chunks
            .iter()
            .map(|chunk| match chunk {
                SQLChunk::Text(t) => t.len(),
                SQLChunk::Param(_) => 1,
                SQLChunk::SQL(sql) => sql.chunks.len() * 8,
                SQLChunk::Table(t) | SQLChunk::Ident(t) => t.len() + 2,
                SQLChunk::Column { table, name } => table.len() + name.len() + 5,
            })
            .sum::<usize>()
            + self.chunks.len()
    }

    fn needs_space(&self, index: usize) -> bool {
        let Some(next) = self.chunks[index + 1..]
            .iter()
            .find_map(SQLChunk::first_char)
        else {
            return false;
        };
        let Some(last) = self.chunks[index].last_char() else {
            return false;
        };

        ends_word(last) && starts_word(next)
    }

    /// Returns references to parameter values from this SQL fragment in the correct order.
    pub fn params(&self) -> Vec<&V> {
        let mut params = Vec::with_capacity(self.chunks.len().min(8));
        self.collect_params(&mut params);
        params
    }

    fn collect_params<'b>(&'b self, out: &mut Vec<&'b V>) {
        for chunk in &self.chunks {
            match chunk {
                SQLChunk::Param(Param { value, .. }) => out.push(value.as_ref()),
                SQLChunk::SQL(sql) => sql.collect_params(out),
                _ => {}
            }
        }
    }
}

/// A chunk ending in one of these never needs a trailing space.
fn ends_word(last: char) -> bool {
    !last.is_whitespace() && !matches!(last, '(' | '.')
}

/// A chunk starting with one of these never needs a leading space.
fn starts_word(first: char) -> bool {
    !first.is_whitespace() && !matches!(first, ')' | ',' | ';' | '.')
}

impl<'a, V: SQLParam> Default for SQL<'a, V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, V: SQLParam + 'a> From<&'static str> for SQL<'a, V> {
    fn from(s: &'static str) -> Self {
        SQL::text(s)
    }
}

impl<'a, V: SQLParam + 'a> From<SQLChunk<'a, V>> for SQL<'a, V> {
    fn from(chunk: SQLChunk<'a, V>) -> Self {
        SQL {
            chunks: smallvec![chunk],
        }
    }
}

impl<'a, V: SQLParam + std::fmt::Debug> Display for SQL<'a, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, r#"sql: "{}", params: {:?}"#, self.sql(), self.params())
    }
}

impl<'a, V: SQLParam + 'a> ToSQL<'a, V> for SQL<'a, V> {
    fn to_sql(&self) -> SQL<'a, V> {
        self.clone()
    }

    fn into_sql(self) -> SQL<'a, V> {
        self
    }
}
