use std::{borrow::Cow, fmt};

use crate::traits::SQLParam;

/// A SQL parameter placeholder.
///
/// Every bound value renders as a positional `?`, so binding order is the
/// order in which parameters appear in the rendered text.
#[derive(Default, Debug, Clone, Hash, Copy, PartialEq, Eq)]
pub struct Placeholder;

impl Placeholder {
    /// Creates a positional placeholder ('?').
    pub const fn positional() -> Self {
        Placeholder
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("?")
    }
}

/// A SQL parameter that associates a value with a placeholder.
#[derive(Debug, Clone)]
pub struct Param<'a, V: SQLParam> {
    /// The placeholder to use in the SQL
    pub placeholder: Placeholder,
    /// The value to bind
    pub value: Cow<'a, V>,
}

impl<'a, V: SQLParam> Param<'a, V> {
    pub fn new(value: impl Into<Cow<'a, V>>) -> Self {
        Self {
            placeholder: Placeholder::positional(),
            value: value.into(),
        }
    }
}
