//! Object descriptors.

use compact_str::CompactString;

use crate::{FieldDescriptor, FieldType, ID_FIELD, RelationshipDescriptor};

/// An object (table) with its fields and child relationships.
///
/// ```
/// use relquery_types::{FieldType, ObjectDescriptor};
///
/// let account = ObjectDescriptor::new("Account")
///     .field("Name", FieldType::String)
///     .reference("OwnerId", ["User"], "Owner")
///     .child_relationship("Contacts", "Contact", "AccountId");
///
/// assert!(account.field_named("id").is_some());
/// assert_eq!(account.child_relationships.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectDescriptor {
    pub name: CompactString,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fields: Vec<FieldDescriptor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub child_relationships: Vec<RelationshipDescriptor>,
}

impl ObjectDescriptor {
    /// Creates an object carrying only its `Id` field.
    pub fn new(name: impl Into<CompactString>) -> Self {
        let name = name.into();
        let id = FieldDescriptor::new(name.clone(), ID_FIELD, FieldType::Id);
        Self {
            name,
            fields: vec![id],
            child_relationships: Vec::new(),
        }
    }

    /// Adds a non-reference field.
    #[must_use]
    pub fn field(mut self, name: impl Into<CompactString>, field_type: FieldType) -> Self {
        self.fields
            .push(FieldDescriptor::new(self.name.clone(), name, field_type));
        self
    }

    /// Adds a reference field with a declared relationship name.
    #[must_use]
    pub fn reference<I, S>(
        mut self,
        name: impl Into<CompactString>,
        targets: I,
        relationship_name: impl Into<CompactString>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        self.fields.push(
            FieldDescriptor::reference(self.name.clone(), name, targets)
                .with_relationship_name(relationship_name),
        );
        self
    }

    /// Declares a named child relationship backed by `child_object.field`.
    #[must_use]
    pub fn child_relationship(
        mut self,
        relationship_name: impl Into<CompactString>,
        child_object: impl Into<CompactString>,
        field: impl Into<CompactString>,
    ) -> Self {
        self.child_relationships.push(
            RelationshipDescriptor::new(self.name.clone(), child_object, field)
                .named(relationship_name),
        );
        self
    }

    /// Declares a child relationship that has no name.
    #[must_use]
    pub fn unnamed_child_relationship(
        mut self,
        child_object: impl Into<CompactString>,
        field: impl Into<CompactString>,
    ) -> Self {
        self.child_relationships
            .push(RelationshipDescriptor::new(self.name.clone(), child_object, field));
        self
    }

    /// Looks up a field by name, ignoring ASCII case.
    #[must_use]
    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Points every field and relationship back at this object.
    ///
    /// Documents omit the owning object on nested entries; call this after
    /// deserializing.
    pub fn normalize(&mut self) {
        for field in &mut self.fields {
            field.object.clone_from(&self.name);
        }
        for relationship in &mut self.child_relationships {
            relationship.parent_object.clone_from(&self.name);
        }
    }
}
