//! Parent-to-child relationship descriptors.

use compact_str::CompactString;

/// A child relationship declared on a parent object.
///
/// `Account` declares `Contacts`, backed by `Contact.AccountId`. A
/// relationship without a name exists in the schema but cannot be used in a
/// subquery.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationshipDescriptor {
    /// Object declaring the relationship. Filled in on registration when
    /// loaded from a document.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent_object: CompactString,
    /// Object on the many side
    pub child_object: CompactString,
    /// Reference field on the child object pointing back at the parent
    pub field: CompactString,
    /// Name used in the FROM clause of a subquery, e.g. `Contacts`
    #[cfg_attr(feature = "serde", serde(default))]
    pub relationship_name: Option<CompactString>,
}

impl RelationshipDescriptor {
    /// Creates an unnamed relationship.
    pub fn new(
        parent_object: impl Into<CompactString>,
        child_object: impl Into<CompactString>,
        field: impl Into<CompactString>,
    ) -> Self {
        Self {
            parent_object: parent_object.into(),
            child_object: child_object.into(),
            field: field.into(),
            relationship_name: None,
        }
    }

    /// Sets the relationship name.
    #[must_use]
    pub fn named(mut self, name: impl Into<CompactString>) -> Self {
        self.relationship_name = Some(name.into());
        self
    }

    /// The relationship name, if one is usable.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.relationship_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// Returns `true` if both descriptors denote the same relationship.
    ///
    /// Identity is the (parent, child, field) triple; the name is not part
    /// of it.
    #[must_use]
    pub fn is_same_relationship(&self, other: &RelationshipDescriptor) -> bool {
        self.parent_object.eq_ignore_ascii_case(&other.parent_object)
            && self.child_object.eq_ignore_ascii_case(&other.child_object)
            && self.field.eq_ignore_ascii_case(&other.field)
    }
}
