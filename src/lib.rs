//! # relquery
//!
//! A schema-checked builder for SOQL-style queries: select fields (including
//! cross-object paths such as `Account.Owner.Name`), filter, order, limit,
//! and embed child relationship subqueries, with optional read permission
//! enforcement on every field that goes into the query.
//!
//! ## Quick Start
//!
//! ```rust
//! use relquery::prelude::*;
//!
//! # fn main() -> relquery::Result<()> {
//! let schema = InMemorySchema::new()
//!     .with_object(
//!         ObjectDescriptor::new("User").field("Name", FieldType::String),
//!     )
//!     .with_object(
//!         ObjectDescriptor::new("Account")
//!             .field("Name", FieldType::String)
//!             .reference("OwnerId", ["User"], "Owner")
//!             .child_relationship("Contacts", "Contact", "AccountId"),
//!     )
//!     .with_object(
//!         ObjectDescriptor::new("Contact")
//!             .field("LastName", FieldType::String)
//!             .reference("AccountId", ["Account"], "Account"),
//!     );
//!
//! let mut query = QueryBuilder::new(&schema, "Account");
//! query
//!     .select_fields(["Name", "Owner.Name"])?
//!     .set_limit(25)
//!     .add_sort("Name", OrderBy::Desc)?;
//! query.subselect_query("Contact")?.select_field("LastName")?;
//!
//! assert_eq!(
//!     query.to_query_string()?,
//!     "SELECT Name, Owner.Name, (SELECT LastName FROM Contacts) \
//!      FROM Account ORDER BY Name DESC LIMIT 25"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature     | Default | Enables                                      |
//! |-------------|---------|----------------------------------------------|
//! | `tracing`   | ✅      | `tracing` events for renders and denials     |
//! | `serde`     |         | `InMemorySchema::from_json` and serde derives |
//! | `profiling` |         | puffin scopes around resolution and render   |

#![cfg_attr(docsrs, feature(doc_cfg))]

// =============================================================================
// Root-level exports
// =============================================================================

/// Result type for relquery operations
pub use relquery_core::error::Result;

/// Query builder
pub use relquery_core::QueryBuilder;

/// Error types
pub mod error {
    pub use relquery_core::error::{QueryError, QueryErrorKind};
    #[cfg(feature = "serde")]
    pub use relquery_core::schema::SchemaLoadError;
}

/// Schema descriptors: objects, fields and child relationships.
pub use relquery_types as types;

// =============================================================================
// Core module - shared functionality
// =============================================================================

/// Building blocks behind [`QueryBuilder`].
///
/// # Module Structure
///
/// - **Schema**: `SchemaProvider`, `InMemorySchema`, `CachedSchema`
/// - **Security**: `SecurityChecker`, `AllowAll`, `PermissionSet`
/// - **Paths**: `FieldPath`, `PathResolver`
/// - **Ordering**: `OrderBy`, `NullsOrder`, `Ordering`, `SortExpression`
pub mod core {
    // ==========================================================================
    // Schema access
    // ==========================================================================

    pub use relquery_core::schema::{CachedSchema, InMemorySchema, SchemaProvider};

    // ==========================================================================
    // Read permissions
    // ==========================================================================

    pub use relquery_core::security::{AllowAll, PermissionSet, SecurityChecker};

    // ==========================================================================
    // Field selection
    // ==========================================================================

    pub use relquery_core::field_set::{FieldGrouping, FieldSet};
    pub use relquery_core::path::{FieldPath, PathResolver};

    // ==========================================================================
    // Ordering
    // ==========================================================================

    pub use relquery_core::ordering::{NullsOrder, OrderBy, Ordering, SortExpression};
}

/// Everything needed to describe a schema and build queries against it.
pub mod prelude {
    pub use crate::QueryBuilder;
    pub use crate::core::*;
    pub use crate::error::{QueryError, QueryErrorKind};
    pub use relquery_types::{
        FieldDescriptor, FieldType, ObjectDescriptor, RelationshipDescriptor,
    };
}
