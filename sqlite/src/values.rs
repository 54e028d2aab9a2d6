//! SQLite value type and its rusqlite bindings

use quarry_core::{SQL, SQLParam};
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use std::borrow::Cow;

/// SQL fragment carrying SQLite parameters.
pub type SQLiteSQL<'a> = SQL<'a, SQLiteValue<'a>>;

/// Represents a SQLite value
#[derive(Debug, Clone, PartialEq, PartialOrd, Default)]
pub enum SQLiteValue<'a> {
    /// Integer value (i64)
    Integer(i64),
    /// Real value (f64)
    Real(f64),
    /// Text value (borrowed or owned string)
    Text(Cow<'a, str>),
    /// Blob value (borrowed or owned binary data)
    Blob(Cow<'a, [u8]>),
    /// NULL value
    #[default]
    Null,
}

impl<'a> SQLiteValue<'a> {
    /// Converts this value into one that owns its data
    pub fn into_owned(self) -> SQLiteValue<'static> {
        match self {
            SQLiteValue::Integer(i) => SQLiteValue::Integer(i),
            SQLiteValue::Real(r) => SQLiteValue::Real(r),
            SQLiteValue::Text(cow) => SQLiteValue::Text(Cow::Owned(cow.into_owned())),
            SQLiteValue::Blob(cow) => SQLiteValue::Blob(Cow::Owned(cow.into_owned())),
            SQLiteValue::Null => SQLiteValue::Null,
        }
    }
}

impl<'a> SQLParam for SQLiteValue<'a> {}

impl<'a> From<SQLiteValue<'a>> for Cow<'a, SQLiteValue<'a>> {
    fn from(value: SQLiteValue<'a>) -> Self {
        Cow::Owned(value)
    }
}

impl<'a> From<&'a SQLiteValue<'a>> for Cow<'a, SQLiteValue<'a>> {
    fn from(value: &'a SQLiteValue<'a>) -> Self {
        Cow::Borrowed(value)
    }
}

impl<'a> From<SQLiteValue<'a>> for SQLiteSQL<'a> {
    fn from(value: SQLiteValue<'a>) -> Self {
        SQL::parameter(value)
    }
}

impl<'a> std::fmt::Display for SQLiteValue<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SQLiteValue::Integer(i) => write!(f, "{i}"),
            SQLiteValue::Real(r) => write!(f, "{r}"),
            SQLiteValue::Text(cow) => f.write_str(cow),
            SQLiteValue::Blob(cow) => f.write_str(&String::from_utf8_lossy(cow)),
            SQLiteValue::Null => f.write_str("NULL"),
        }
    }
}

//------------------------------------------------------------------------------
// Database Driver Implementations
//------------------------------------------------------------------------------

impl<'a> rusqlite::ToSql for SQLiteValue<'a> {
    fn to_sql(&self) -> ::rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SQLiteValue::Null => ToSqlOutput::Owned(Value::Null),
            SQLiteValue::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SQLiteValue::Real(f) => ToSqlOutput::Owned(Value::Real(*f)),
            SQLiteValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SQLiteValue::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b.as_ref())),
        })
    }
}
