//! Tracing utilities for query building observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event with the rendered query and field count.
///
/// ```ignore
/// relquery_trace_query!(&soql, self.fields.len());
/// ```
#[macro_export]
macro_rules! relquery_trace_query {
    ($soql:expr, $field_count:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(soql = %$soql, fields = $field_count, "relquery.render");
    };
}

/// Emit a debug-level tracing event when a subquery builder is created.
///
/// ```ignore
/// relquery_trace_subquery!(&self.table, name);
/// ```
#[macro_export]
macro_rules! relquery_trace_subquery {
    ($parent:expr, $relationship:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(parent = %$parent, relationship = %$relationship, "relquery.subquery");
    };
}

/// Emit a warn-level tracing event for a denied read permission check.
///
/// ```ignore
/// relquery_trace_denied!(object, Some(field));
/// relquery_trace_denied!(object, None::<&str>);
/// ```
#[macro_export]
macro_rules! relquery_trace_denied {
    ($object:expr, $field:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(object = %$object, field = ?$field, "relquery.access_denied");
    };
}
