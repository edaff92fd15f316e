//! Field descriptors.

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::naming;

/// Data type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldType {
    /// Record identifier (primary key)
    Id,
    /// Lookup or master-detail reference to another record
    Reference,
    #[default]
    String,
    TextArea,
    Boolean,
    Integer,
    Double,
    Currency,
    Percent,
    Date,
    DateTime,
    Picklist,
    Email,
    Phone,
    Url,
}

impl FieldType {
    /// Returns `true` for lookup/master-detail fields.
    #[inline]
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self, FieldType::Reference)
    }

    /// Lowercase type name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldType::Id => "id",
            FieldType::Reference => "reference",
            FieldType::String => "string",
            FieldType::TextArea => "textarea",
            FieldType::Boolean => "boolean",
            FieldType::Integer => "integer",
            FieldType::Double => "double",
            FieldType::Currency => "currency",
            FieldType::Percent => "percent",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::Picklist => "picklist",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Url => "url",
        }
    }
}

impl core::fmt::Display for FieldType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of one object, as resolved by a schema provider.
///
/// This is the "field token" the query builder accepts in place of a field
/// name. Two descriptors denote the same field when their object and field
/// names match, ignoring ASCII case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    /// Owning object. Filled in on registration when loaded from a document.
    #[cfg_attr(feature = "serde", serde(default))]
    pub object: CompactString,
    /// Field API name, e.g. `AccountId`
    pub name: CompactString,
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub field_type: FieldType,
    /// Objects a reference field may point at. More than one means the
    /// reference is polymorphic.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reference_to: SmallVec<[CompactString; 1]>,
    /// Declared traversal name, e.g. `Account` for `AccountId`
    #[cfg_attr(feature = "serde", serde(default))]
    pub relationship_name: Option<CompactString>,
}

impl FieldDescriptor {
    /// Creates a non-reference field.
    pub fn new(
        object: impl Into<CompactString>,
        name: impl Into<CompactString>,
        field_type: FieldType,
    ) -> Self {
        Self {
            object: object.into(),
            name: name.into(),
            field_type,
            reference_to: SmallVec::new(),
            relationship_name: None,
        }
    }

    /// Creates a reference field pointing at `targets`.
    pub fn reference<I, S>(
        object: impl Into<CompactString>,
        name: impl Into<CompactString>,
        targets: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self {
            object: object.into(),
            name: name.into(),
            field_type: FieldType::Reference,
            reference_to: targets.into_iter().map(Into::into).collect(),
            relationship_name: None,
        }
    }

    /// Sets the declared relationship name.
    #[must_use]
    pub fn with_relationship_name(mut self, name: impl Into<CompactString>) -> Self {
        self.relationship_name = Some(name.into());
        self
    }

    /// Returns `true` if this field can be traversed to another object.
    #[inline]
    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.field_type.is_reference()
    }

    /// The object a traversal through this field lands on.
    ///
    /// Polymorphic references have several candidates; the first declared
    /// one is used.
    #[must_use]
    pub fn referenced_object(&self) -> Option<&str> {
        if !self.is_reference() {
            return None;
        }
        self.reference_to.first().map(CompactString::as_str)
    }

    /// Returns `true` if this reference may point at `object`.
    #[must_use]
    pub fn references(&self, object: &str) -> bool {
        self.is_reference()
            && self
                .reference_to
                .iter()
                .any(|t| t.eq_ignore_ascii_case(object))
    }

    /// Name used when this field is a non-terminal segment of a path.
    #[must_use]
    pub fn traversal_name(&self) -> CompactString {
        match &self.relationship_name {
            Some(name) => name.clone(),
            None => naming::relationship_name(&self.name),
        }
    }

    /// Returns `true` if both descriptors denote the same field.
    #[must_use]
    pub fn is_same_field(&self, other: &FieldDescriptor) -> bool {
        self.object.eq_ignore_ascii_case(&other.object)
            && self.name.eq_ignore_ascii_case(&other.name)
    }

    /// Returns `true` if this field belongs to `object`.
    #[must_use]
    pub fn belongs_to(&self, object: &str) -> bool {
        self.object.eq_ignore_ascii_case(object)
    }
}
