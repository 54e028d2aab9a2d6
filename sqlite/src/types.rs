//! Host type to SQLite storage class mapping.
//!
//! Every host type a column may hold implements [`SQLiteType`], which names
//! exactly one storage class and knows how to move a value in and out of the
//! engine. Types that can only be bound (borrowed strings and slices) implement
//! [`SQLiteBind`] alone.

use std::borrow::Cow;

use quarry_core::types::{Blob, DataType, Integer, Real, Text};
use quarry_core::{QuarryError, Result};
use rusqlite::types::ValueRef;

use crate::values::SQLiteValue;

/// SQLite storage class of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Blob,
}

impl ColumnType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ColumnType::Integer => Integer::NAME,
            ColumnType::Real => Real::NAME,
            ColumnType::Text => Text::NAME,
            ColumnType::Blob => Blob::NAME,
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host type stored in a column.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be stored in a SQLite column",
    label = "unsupported column type",
    note = "supported types are integers up to 32 bits unsigned or 64 bits signed, bool, f32, f64, String, Vec<u8>, [u8; N] and Option of any of these"
)]
pub trait SQLiteType: Sized + Clone + 'static {
    /// Type-level storage class used for comparison checks.
    type SQLType: DataType;

    const COLUMN_TYPE: ColumnType;
    const NULLABLE: bool = false;

    fn to_value(&self) -> SQLiteValue<'_>;

    /// Reads a value from column `index` of a result row.
    fn from_value(value: ValueRef<'_>, index: usize) -> Result<Self>;
}

/// A value that can be bound as a parameter compared against a column.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be bound as a SQLite parameter",
    label = "not a bindable value"
)]
pub trait SQLiteBind {
    type SQLType: DataType;

    fn into_value(self) -> SQLiteValue<'static>;
}

pub(crate) fn storage_class(value: &ValueRef<'_>) -> &'static str {
    match value {
        ValueRef::Null => "NULL",
        ValueRef::Integer(_) => Integer::NAME,
        ValueRef::Real(_) => Real::NAME,
        ValueRef::Text(_) => Text::NAME,
        ValueRef::Blob(_) => Blob::NAME,
    }
}

fn mismatch<T>(index: usize, expected: &'static str, value: &ValueRef<'_>) -> Result<T> {
    Err(QuarryError::decode(index, expected, storage_class(value)))
}

macro_rules! integer_type {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl SQLiteType for $ty {
                type SQLType = Integer;
                const COLUMN_TYPE: ColumnType = ColumnType::Integer;

                fn to_value(&self) -> SQLiteValue<'_> {
                    SQLiteValue::Integer(*self as i64)
                }

                fn from_value(value: ValueRef<'_>, index: usize) -> Result<Self> {
                    match value {
                        ValueRef::Integer(i) => <$ty>::try_from(i).map_err(|_| {
                            QuarryError::decode(index, stringify!($ty), compact_str::format_compact!("{i}"))
                        }),
                        other => mismatch(index, Integer::NAME, &other),
                    }
                }
            }

            impl SQLiteBind for $ty {
                type SQLType = Integer;

                fn into_value(self) -> SQLiteValue<'static> {
                    SQLiteValue::Integer(self as i64)
                }
            }
        )+
    };
}

integer_type!(i8, i16, i32, i64, isize, u8, u16, u32);

impl SQLiteType for bool {
    type SQLType = Integer;
    const COLUMN_TYPE: ColumnType = ColumnType::Integer;

    fn to_value(&self) -> SQLiteValue<'_> {
        SQLiteValue::Integer(i64::from(*self))
    }

    fn from_value(value: ValueRef<'_>, index: usize) -> Result<Self> {
        match value {
            ValueRef::Integer(i) => Ok(i != 0),
            other => mismatch(index, Integer::NAME, &other),
        }
    }
}

impl SQLiteBind for bool {
    type SQLType = Integer;

    fn into_value(self) -> SQLiteValue<'static> {
        SQLiteValue::Integer(i64::from(self))
    }
}

macro_rules! real_type {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl SQLiteType for $ty {
                type SQLType = Real;
                const COLUMN_TYPE: ColumnType = ColumnType::Real;

                fn to_value(&self) -> SQLiteValue<'_> {
                    SQLiteValue::Real(f64::from(*self))
                }

                fn from_value(value: ValueRef<'_>, index: usize) -> Result<Self> {
                    match value {
                        ValueRef::Real(r) => Ok(r as $ty),
                        ValueRef::Integer(i) => Ok(i as $ty),
                        other => mismatch(index, Real::NAME, &other),
                    }
                }
            }

            impl SQLiteBind for $ty {
                type SQLType = Real;

                fn into_value(self) -> SQLiteValue<'static> {
                    SQLiteValue::Real(f64::from(self))
                }
            }
        )+
    };
}

real_type!(f32, f64);

impl SQLiteType for String {
    type SQLType = Text;
    const COLUMN_TYPE: ColumnType = ColumnType::Text;

    fn to_value(&self) -> SQLiteValue<'_> {
        SQLiteValue::Text(Cow::Borrowed(self))
    }

    fn from_value(value: ValueRef<'_>, index: usize) -> Result<Self> {
        match value {
            ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| QuarryError::decode(index, "UTF-8 TEXT", "invalid UTF-8")),
            other => mismatch(index, Text::NAME, &other),
        }
    }
}

impl SQLiteBind for String {
    type SQLType = Text;

    fn into_value(self) -> SQLiteValue<'static> {
        SQLiteValue::Text(Cow::Owned(self))
    }
}

impl SQLiteBind for &str {
    type SQLType = Text;

    fn into_value(self) -> SQLiteValue<'static> {
        SQLiteValue::Text(Cow::Owned(self.to_owned()))
    }
}

impl SQLiteBind for &String {
    type SQLType = Text;

    fn into_value(self) -> SQLiteValue<'static> {
        SQLiteValue::Text(Cow::Owned(self.clone()))
    }
}

impl SQLiteType for Vec<u8> {
    type SQLType = Blob;
    const COLUMN_TYPE: ColumnType = ColumnType::Blob;

    fn to_value(&self) -> SQLiteValue<'_> {
        SQLiteValue::Blob(Cow::Borrowed(self))
    }

    fn from_value(value: ValueRef<'_>, index: usize) -> Result<Self> {
        match value {
            ValueRef::Blob(bytes) => Ok(bytes.to_vec()),
            other => mismatch(index, Blob::NAME, &other),
        }
    }
}

impl SQLiteBind for Vec<u8> {
    type SQLType = Blob;

    fn into_value(self) -> SQLiteValue<'static> {
        SQLiteValue::Blob(Cow::Owned(self))
    }
}

impl SQLiteBind for &[u8] {
    type SQLType = Blob;

    fn into_value(self) -> SQLiteValue<'static> {
        SQLiteValue::Blob(Cow::Owned(self.to_vec()))
    }
}

impl<const N: usize> SQLiteType for [u8; N] {
    type SQLType = Blob;
    const COLUMN_TYPE: ColumnType = ColumnType::Blob;

    fn to_value(&self) -> SQLiteValue<'_> {
        SQLiteValue::Blob(Cow::Borrowed(self.as_slice()))
    }

    fn from_value(value: ValueRef<'_>, index: usize) -> Result<Self> {
        match value {
            ValueRef::Blob(bytes) => <[u8; N]>::try_from(bytes).map_err(|_| {
                QuarryError::decode(
                    index,
                    compact_str::format_compact!("BLOB of {N} bytes"),
                    compact_str::format_compact!("BLOB of {} bytes", bytes.len()),
                )
            }),
            other => mismatch(index, Blob::NAME, &other),
        }
    }
}

impl<const N: usize> SQLiteBind for [u8; N] {
    type SQLType = Blob;

    fn into_value(self) -> SQLiteValue<'static> {
        SQLiteValue::Blob(Cow::Owned(self.to_vec()))
    }
}

impl<T: SQLiteType> SQLiteType for Option<T> {
    type SQLType = T::SQLType;
    const COLUMN_TYPE: ColumnType = T::COLUMN_TYPE;
    const NULLABLE: bool = true;

    fn to_value(&self) -> SQLiteValue<'_> {
        match self {
            Some(value) => value.to_value(),
            None => SQLiteValue::Null,
        }
    }

    fn from_value(value: ValueRef<'_>, index: usize) -> Result<Self> {
        match value {
            ValueRef::Null => Ok(None),
            other => T::from_value(other, index).map(Some),
        }
    }
}

impl<T: SQLiteBind> SQLiteBind for Option<T> {
    type SQLType = T::SQLType;

    fn into_value(self) -> SQLiteValue<'static> {
        match self {
            Some(value) => value.into_value(),
            None => SQLiteValue::Null,
        }
    }
}

/// Reads a non-nullable value, turning NULL into a decode error.
pub(crate) fn decode_column<T: SQLiteType>(row: &rusqlite::Row<'_>, index: usize) -> Result<T> {
    let value = row.get_ref(index)?;
    if matches!(value, ValueRef::Null) && !T::NULLABLE {
        return Err(QuarryError::decode(index, T::COLUMN_TYPE.as_str(), "NULL"));
    }
    T::from_value(value, index)
}
