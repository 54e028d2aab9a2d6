//! Tracing utilities for query and transaction observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event with the SQL text and parameter count.
///
/// ```ignore
/// quarry_trace_query!(&sql_str, params.len());
/// ```
#[macro_export]
macro_rules! quarry_trace_query {
    ($sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        $crate::__tracing::debug!(sql = %$sql, params = $param_count, "quarry.query");
    };
}

/// Emit an info-level tracing event for transaction lifecycle (begin, commit, rollback).
///
/// ```ignore
/// quarry_trace_tx!("begin");
/// quarry_trace_tx!("rollback");
/// ```
///
/// With an error, the event is a warning carrying it:
///
/// ```ignore
/// quarry_trace_tx!("rollback failed", err);
/// ```
#[macro_export]
macro_rules! quarry_trace_tx {
    ($event:literal) => {
        #[cfg(feature = "tracing")]
        $crate::__tracing::info!(event = $event, "quarry.transaction");
    };
    ($event:literal, $err:expr) => {
        #[cfg(feature = "tracing")]
        $crate::__tracing::warn!(event = $event, error = %$err, "quarry.transaction");
        #[cfg(not(feature = "tracing"))]
        let _ = &$err;
    };
}
