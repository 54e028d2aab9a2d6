use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuarryError {
    /// A parameter could not be bound (count or conversion mismatch)
    #[error("Binding error: {0}")]
    Binding(CompactString),

    /// The engine rejected the statement: syntax, constraint violation, busy/locked
    #[error("Execution error: {message}")]
    Execution {
        /// Extended SQLite result code, when the engine reported one
        code: Option<i32>,
        message: CompactString,
    },

    /// A result column could not be read as the expected host type
    #[error("Decode error at column {index}: expected {expected}, found {found}")]
    Decode {
        index: usize,
        expected: CompactString,
        found: CompactString,
    },

    /// The API was used in a way the query state does not allow
    #[error("Usage error: {0}")]
    Usage(CompactString),

    /// Generic error
    #[error("Database error: {0}")]
    Other(CompactString),
}

impl QuarryError {
    pub fn decode(
        index: usize,
        expected: impl Into<CompactString>,
        found: impl Into<CompactString>,
    ) -> Self {
        Self::Decode {
            index,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn usage(message: impl Into<CompactString>) -> Self {
        Self::Usage(message.into())
    }

    /// SQLITE_BUSY or SQLITE_LOCKED, including their extended codes.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Execution { code: Some(code), .. } if matches!(code & 0xff, 5 | 6))
    }
}

#[cfg(feature = "rusqlite")]
impl From<rusqlite::Error> for QuarryError {
    fn from(err: rusqlite::Error) -> Self {
        use compact_str::ToCompactString;
        use rusqlite::Error as E;

        match err {
            E::InvalidParameterCount(given, expected) => Self::Binding(compact_str::format_compact!(
                "statement expects {expected} parameters, {given} were bound"
            )),
            E::InvalidParameterName(name) => {
                Self::Binding(compact_str::format_compact!("unknown parameter `{name}`"))
            }
            E::ToSqlConversionFailure(e) => Self::Binding(e.to_compact_string()),
            E::InvalidColumnType(index, _, found) => {
                Self::decode(index, "a compatible storage class", found.to_compact_string())
            }
            E::FromSqlConversionFailure(index, found, e) => Self::Decode {
                index,
                expected: e.to_compact_string(),
                found: found.to_compact_string(),
            },
            E::IntegralValueOutOfRange(index, value) => {
                Self::decode(index, "an in-range integer", value.to_compact_string())
            }
            E::InvalidColumnIndex(index) => {
                Self::usage(compact_str::format_compact!("column {index} is out of range"))
            }
            E::SqliteFailure(ffi, message) => Self::Execution {
                code: Some(ffi.extended_code),
                message: message
                    .map(CompactString::from)
                    .unwrap_or_else(|| ffi.to_compact_string()),
            },
            other => Self::Execution {
                code: None,
                message: other.to_compact_string(),
            },
        }
    }
}

/// Result type for database operations
pub type Result<T> = std::result::Result<T, QuarryError>;
