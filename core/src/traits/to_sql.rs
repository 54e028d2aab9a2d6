//! ToSQL trait for converting types to SQL fragments.

use crate::{sql::SQL, traits::SQLParam};

/// Trait for types that can be converted to SQL fragments.
///
/// The `'a` lifetime ties any borrowed parameter values to the resulting SQL
/// fragment, allowing zero-copy SQL construction when inputs are already
/// borrowed.
pub trait ToSQL<'a, V: SQLParam> {
    fn to_sql(&self) -> SQL<'a, V>;

    /// Consume self and return SQL without cloning.
    /// Default delegates to `to_sql()` (which clones). Types that own their SQL
    /// override this to avoid the clone.
    fn into_sql(self) -> SQL<'a, V>
    where
        Self: Sized,
    {
        self.to_sql()
    }
}

impl<'a, V: SQLParam + 'a, T: ToSQL<'a, V>> ToSQL<'a, V> for &T {
    fn to_sql(&self) -> SQL<'a, V> {
        (**self).to_sql()
    }
}
