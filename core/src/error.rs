use thiserror::Error;

/// Errors raised while assembling a query.
///
/// Every variant is raised at the call that detected it; the builder is left
/// as it was before that call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Unknown or unresolvable field, or a field token from another object
    #[error("Invalid field '{field}' on {object}")]
    InvalidField { object: String, field: String },

    /// A non-terminal path segment that cannot be traversed
    #[error("Field '{field}' on {object} is not a reference field and cannot be traversed")]
    NonReferenceField { object: String, field: String },

    /// Field set bound to another object, or a disallowed cross-object path
    #[error("Invalid field set '{field_set}' for {object}: {reason}")]
    InvalidFieldSet {
        object: String,
        field_set: String,
        reason: String,
    },

    /// Subquery on a subquery, or a relationship that cannot back a subquery
    #[error("Invalid subquery relationship '{relationship}' on {object}: {reason}")]
    InvalidSubqueryRelationship {
        object: String,
        relationship: String,
        reason: String,
    },

    /// Read permission check failed
    #[error("Read access denied to {}", access_target(.object, .field.as_deref()))]
    Authorization {
        object: String,
        field: Option<String>,
    },
}

fn access_target(object: &str, field: Option<&str>) -> String {
    match field {
        Some(field) => format!("field {object}.{field}"),
        None => format!("object {object}"),
    }
}

/// Discriminant of a [`QueryError`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryErrorKind {
    InvalidField,
    NonReferenceField,
    InvalidFieldSet,
    InvalidSubqueryRelationship,
    Authorization,
}

impl QueryError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> QueryErrorKind {
        match self {
            QueryError::InvalidField { .. } => QueryErrorKind::InvalidField,
            QueryError::NonReferenceField { .. } => QueryErrorKind::NonReferenceField,
            QueryError::InvalidFieldSet { .. } => QueryErrorKind::InvalidFieldSet,
            QueryError::InvalidSubqueryRelationship { .. } => {
                QueryErrorKind::InvalidSubqueryRelationship
            }
            QueryError::Authorization { .. } => QueryErrorKind::Authorization,
        }
    }

    pub(crate) fn invalid_field(object: &str, field: &str) -> Self {
        QueryError::InvalidField {
            object: object.to_owned(),
            field: field.to_owned(),
        }
    }

    pub(crate) fn non_reference_field(object: &str, field: &str) -> Self {
        QueryError::NonReferenceField {
            object: object.to_owned(),
            field: field.to_owned(),
        }
    }

    pub(crate) fn invalid_field_set(
        object: &str,
        field_set: &str,
        reason: impl Into<String>,
    ) -> Self {
        QueryError::InvalidFieldSet {
            object: object.to_owned(),
            field_set: field_set.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_subquery(
        object: &str,
        relationship: &str,
        reason: impl Into<String>,
    ) -> Self {
        QueryError::InvalidSubqueryRelationship {
            object: object.to_owned(),
            relationship: relationship.to_owned(),
            reason: reason.into(),
        }
    }

    /// Creates an [`QueryError::Authorization`] for a field.
    ///
    /// Public so custom [`SecurityChecker`](crate::SecurityChecker)
    /// implementations can report denials.
    pub fn field_not_readable(object: &str, field: &str) -> Self {
        QueryError::Authorization {
            object: object.to_owned(),
            field: Some(field.to_owned()),
        }
    }

    /// Creates an [`QueryError::Authorization`] for a whole object.
    pub fn object_not_readable(object: &str) -> Self {
        QueryError::Authorization {
            object: object.to_owned(),
            field: None,
        }
    }
}

/// Result type for query building operations
pub type Result<T> = std::result::Result<T, QueryError>;
