//! Schema descriptor types shared by the relquery crates.
//!
//! These are plain data: a schema provider hands them out, the query builder
//! consumes them. Nothing in here talks to a live schema.
//!
//! - [`FieldType`] - the data type of a field
//! - [`FieldDescriptor`] - one field of one object (a "field token")
//! - [`RelationshipDescriptor`] - a parent-to-child relationship
//! - [`ObjectDescriptor`] - an object with its fields and child relationships
//!
//! # Features
//!
//! - `serde` - Enable serde serialization/deserialization

mod field;
mod naming;
mod object;
mod relationship;

/// String type used for every name in the schema.
pub use compact_str::CompactString;
pub use field::{FieldDescriptor, FieldType};
pub use naming::{id_field_name, relationship_name};
pub use object::ObjectDescriptor;
pub use relationship::RelationshipDescriptor;

/// Name of the primary key field every object carries.
pub const ID_FIELD: &str = "Id";

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::{FieldDescriptor, FieldType, ObjectDescriptor, RelationshipDescriptor};
}
