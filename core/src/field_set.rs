//! Named field groupings.

use compact_str::CompactString;

/// An externally defined, named set of fields bound to one object.
///
/// Expansion is the grouping's business; the builder only sees the resulting
/// field paths, in order.
pub trait FieldGrouping {
    /// Name used in error messages.
    fn name(&self) -> &str;

    /// Object the grouping is bound to.
    fn object(&self) -> &str;

    /// Dotted field paths relative to [`FieldGrouping::object`].
    fn field_paths(&self) -> Vec<CompactString>;
}

/// A fixed list of field paths.
///
/// ```
/// use relquery_core::{FieldGrouping, FieldSet};
///
/// let summary = FieldSet::new("Summary", "Account").with_fields(["Name", "Owner.Name"]);
/// assert_eq!(summary.field_paths().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    name: CompactString,
    object: CompactString,
    members: Vec<CompactString>,
}

impl FieldSet {
    pub fn new(name: impl Into<CompactString>, object: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            object: object.into(),
            members: Vec::new(),
        }
    }

    /// Appends field paths.
    #[must_use]
    pub fn with_fields<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        self.members.extend(paths.into_iter().map(Into::into));
        self
    }
}

impl FieldGrouping for FieldSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn object(&self) -> &str {
        &self.object
    }

    fn field_paths(&self) -> Vec<CompactString> {
        self.members.clone()
    }
}
