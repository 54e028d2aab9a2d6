//! Type compatibility rules for SQL types.

use super::{DataType, Integer, Real};

/// Marker trait indicating two SQL types can be compared.
///
/// - Each type compares with itself
/// - INTEGER and REAL compare with each other (numeric affinity)
///
/// Everything else is a compile error, e.g. INTEGER against TEXT.
///
/// ```ignore
/// use quarry_core::types::{Compatible, Integer, Real, Text};
///
/// fn requires_compatible<L: Compatible<R>, R: DataType>() {}
///
/// requires_compatible::<Integer, Integer>(); // OK
/// requires_compatible::<Integer, Real>();    // OK
/// // requires_compatible::<Integer, Text>(); // ERROR
/// ```
#[diagnostic::on_unimplemented(
    message = "SQL type `{Self}` is not compatible with `{Rhs}`",
    label = "these SQL types cannot be compared",
    note = "compatible types are INTEGER with INTEGER/REAL, REAL with REAL/INTEGER, and any type with itself"
)]
pub trait Compatible<Rhs: DataType = Self>: DataType {}

impl<T: DataType> Compatible<T> for T {}

impl Compatible<Real> for Integer {}
impl Compatible<Integer> for Real {}
