//! Core of relquery: schema lookup, permission checks, field paths and the
//! query builder.

#[macro_use]
mod tracing;
mod profiling;

pub mod error;
pub mod field_set;
pub mod ordering;
pub mod path;
pub mod query;
pub mod schema;
pub mod security;

#[cfg(test)]
mod test_schema;

// Re-export key types and traits
pub use error::{QueryError, QueryErrorKind, Result};
pub use field_set::{FieldGrouping, FieldSet};
pub use ordering::{NullsOrder, OrderBy, Ordering, SortExpression};
pub use path::{FieldPath, PathResolver};
pub use query::QueryBuilder;
#[cfg(feature = "serde")]
pub use schema::SchemaLoadError;
pub use schema::{CachedSchema, InMemorySchema, SchemaProvider};
pub use security::{AllowAll, PermissionSet, SecurityChecker};
