//! Read-permission checks.
//!
//! A builder consults its [`SecurityChecker`] only when field security
//! enforcement is switched on, or when asked to assert object access.

use compact_str::CompactString;
use hashbrown::HashSet;

use crate::error::{QueryError, Result};
use crate::schema::fold_case;

/// Decides whether the caller may read an object or a field.
pub trait SecurityChecker {
    /// Fails with [`QueryError::Authorization`] if `object.field` is not readable.
    fn check_field_readable(&self, object: &str, field: &str) -> Result<()>;

    /// Fails with [`QueryError::Authorization`] if `object` is not readable.
    fn check_object_readable(&self, object: &str) -> Result<()>;
}

impl<S: SecurityChecker + ?Sized> SecurityChecker for &S {
    fn check_field_readable(&self, object: &str, field: &str) -> Result<()> {
        (**self).check_field_readable(object, field)
    }

    fn check_object_readable(&self, object: &str) -> Result<()> {
        (**self).check_object_readable(object)
    }
}

/// Permits everything. The checker every builder starts with.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl SecurityChecker for AllowAll {
    #[inline]
    fn check_field_readable(&self, _object: &str, _field: &str) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn check_object_readable(&self, _object: &str) -> Result<()> {
        Ok(())
    }
}

/// Permits everything except explicitly denied objects and fields.
///
/// Denying an object also denies every field on it.
///
/// ```
/// use relquery_core::{PermissionSet, SecurityChecker};
///
/// let perms = PermissionSet::new()
///     .deny_field("Account", "AnnualRevenue")
///     .deny_object("Case");
///
/// assert!(perms.check_field_readable("Account", "Name").is_ok());
/// assert!(perms.check_field_readable("account", "annualrevenue").is_err());
/// assert!(perms.check_field_readable("Case", "Subject").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    denied_objects: HashSet<CompactString>,
    denied_fields: HashSet<(CompactString, CompactString)>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Denies read access to a whole object.
    #[must_use]
    pub fn deny_object(mut self, object: &str) -> Self {
        self.denied_objects.insert(fold_case(object));
        self
    }

    /// Denies read access to one field.
    #[must_use]
    pub fn deny_field(mut self, object: &str, field: &str) -> Self {
        self.denied_fields
            .insert((fold_case(object), fold_case(field)));
        self
    }

    fn object_denied(&self, object: &str) -> bool {
        self.denied_objects.contains(&fold_case(object))
    }
}

impl SecurityChecker for PermissionSet {
    fn check_field_readable(&self, object: &str, field: &str) -> Result<()> {
        let denied = self.object_denied(object)
            || self
                .denied_fields
                .contains(&(fold_case(object), fold_case(field)));
        if denied {
            crate::relquery_trace_denied!(object, Some(field));
            return Err(QueryError::field_not_readable(object, field));
        }
        Ok(())
    }

    fn check_object_readable(&self, object: &str) -> Result<()> {
        if self.object_denied(object) {
            crate::relquery_trace_denied!(object, None::<&str>);
            return Err(QueryError::object_not_readable(object));
        }
        Ok(())
    }
}
