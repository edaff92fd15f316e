//! ORDER BY entries.
//!
//! Two kinds coexist: [`Ordering`] sorts on a field of the queried object
//! itself, [`SortExpression`] sorts on any [`FieldPath`]. A builder renders
//! all orderings first, then all sort expressions.

use core::fmt;

use relquery_types::FieldDescriptor;

use crate::path::FieldPath;

/// Sort direction for ORDER BY clauses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OrderBy {
    #[default]
    Asc,
    Desc,
}

impl OrderBy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Asc => "ASC",
            OrderBy::Desc => "DESC",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement of null values relative to the sorted values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NullsOrder {
    First,
    Last,
}

impl NullsOrder {
    pub const fn as_str(&self) -> &'static str {
        match self {
            NullsOrder::First => "NULLS FIRST",
            NullsOrder::Last => "NULLS LAST",
        }
    }
}

fn write_entry(
    f: &mut fmt::Formatter<'_>,
    target: &str,
    direction: OrderBy,
    nulls: Option<NullsOrder>,
) -> fmt::Result {
    write!(f, "{target} {direction}")?;
    if let Some(nulls) = nulls {
        write!(f, " {}", nulls.as_str())?;
    }
    Ok(())
}

/// Sort on a field of the queried object. No relationship traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    field: FieldDescriptor,
    direction: OrderBy,
    nulls: Option<NullsOrder>,
}

impl Ordering {
    pub fn new(field: FieldDescriptor, direction: OrderBy) -> Self {
        Self {
            field,
            direction,
            nulls: None,
        }
    }

    #[must_use]
    pub fn with_nulls(mut self, nulls: NullsOrder) -> Self {
        self.nulls = Some(nulls);
        self
    }

    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    pub fn direction(&self) -> OrderBy {
        self.direction
    }

    pub fn nulls(&self) -> Option<NullsOrder> {
        self.nulls
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_entry(f, &self.field.name, self.direction, self.nulls)
    }
}

/// Sort on a possibly cross-object field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortExpression {
    path: FieldPath,
    direction: OrderBy,
    nulls: Option<NullsOrder>,
}

impl SortExpression {
    pub fn new(path: FieldPath, direction: OrderBy) -> Self {
        Self {
            path,
            direction,
            nulls: None,
        }
    }

    #[must_use]
    pub fn with_nulls(mut self, nulls: NullsOrder) -> Self {
        self.nulls = Some(nulls);
        self
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn direction(&self) -> OrderBy {
        self.direction
    }

    pub fn nulls(&self) -> Option<NullsOrder> {
        self.nulls
    }
}

impl fmt::Display for SortExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_entry(f, self.path.as_str(), self.direction, self.nulls)
    }
}
