//! SQL data type markers for compile-time type safety.
//!
//! These zero-sized markers stand for SQLite storage classes at the type
//! level, so the compiler can reject comparisons between incompatible
//! operands (an INTEGER column against a string, for example).
//!
//! ```text
//! DataType
//! ├── Numeric
//! │   ├── Integer
//! │   └── Real
//! ├── Textual
//! │   └── Text
//! └── Blob
//! ```

mod coerce;

pub use coerce::*;

mod private {
    pub trait Sealed {}
}

/// Represents a SQL data type at the type level.
///
/// This is the base trait for all SQL type markers. It is sealed to prevent
/// external implementations, ensuring only the predefined SQL types can be used.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a recognized SQL data type",
    label = "use a quarry SQL type marker (Integer, Real, Text, Blob)"
)]
pub trait DataType: private::Sealed + Copy + Default + 'static {
    /// Storage class name as written in DDL.
    const NAME: &'static str;
}

/// Numeric SQL types.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a numeric SQL type",
    label = "expected Integer or Real"
)]
pub trait Numeric: DataType {}

/// String/text SQL types.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a text SQL type",
    label = "LIKE and GLOB patterns only apply to TEXT columns"
)]
pub trait Textual: DataType {}

/// SQL INTEGER storage class marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Integer;

/// SQL REAL storage class marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Real;

/// SQL TEXT storage class marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Text;

/// SQL BLOB storage class marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Blob;

impl private::Sealed for Integer {}
impl private::Sealed for Real {}
impl private::Sealed for Text {}
impl private::Sealed for Blob {}

impl DataType for Integer {
    const NAME: &'static str = "INTEGER";
}
impl DataType for Real {
    const NAME: &'static str = "REAL";
}
impl DataType for Text {
    const NAME: &'static str = "TEXT";
}
impl DataType for Blob {
    const NAME: &'static str = "BLOB";
}

impl Numeric for Integer {}
impl Numeric for Real {}
impl Textual for Text {}
