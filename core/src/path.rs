//! Field paths and their resolution.
//!
//! A [`FieldPath`] is a non-empty chain of fields where every field but the
//! last is a reference. `Contact.Account.Owner.Name` on `Case` resolves to
//! `[Case.ContactId, Contact.AccountId, Account.OwnerId, User.Name]`.

use core::fmt;
use core::hash::{Hash, Hasher};

use compact_str::CompactString;
use relquery_types::{FieldDescriptor, id_field_name};
use smallvec::SmallVec;

use crate::error::{QueryError, Result};
use crate::schema::SchemaProvider;
use crate::security::SecurityChecker;

/// A resolved, possibly cross-object, reference to one field.
///
/// Equality compares the field chain, ignoring ASCII case. The canonical
/// text form traverses non-terminal fields by relationship name:
/// `[Contact.AccountId, Account.Name]` renders as `Account.Name`.
#[derive(Debug, Clone)]
pub struct FieldPath {
    segments: SmallVec<[FieldDescriptor; 2]>,
    canonical: CompactString,
}

impl FieldPath {
    /// Builds a path from already validated segments. `segments` must not be
    /// empty.
    fn from_segments(segments: SmallVec<[FieldDescriptor; 2]>) -> Self {
        let mut canonical = CompactString::default();
        let last = segments.len().saturating_sub(1);
        for (idx, segment) in segments.iter().enumerate() {
            if idx < last {
                canonical.push_str(&segment.traversal_name());
                canonical.push('.');
            } else {
                canonical.push_str(&segment.name);
            }
        }
        Self {
            segments,
            canonical,
        }
    }

    /// The field chain, root first.
    pub fn segments(&self) -> &[FieldDescriptor] {
        &self.segments
    }

    /// The field the path ends on.
    pub fn leaf(&self) -> &FieldDescriptor {
        &self.segments[self.segments.len() - 1]
    }

    /// Object the path starts from.
    pub fn root_object(&self) -> &str {
        &self.segments[0].object
    }

    /// Number of fields in the chain.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path traverses at least one reference.
    pub fn is_cross_object(&self) -> bool {
        self.segments.len() > 1
    }

    /// Canonical text form.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl From<FieldDescriptor> for FieldPath {
    fn from(field: FieldDescriptor) -> Self {
        Self::from_segments(smallvec::smallvec![field])
    }
}

impl PartialEq for FieldPath {
    fn eq(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.is_same_field(b))
    }
}

impl Eq for FieldPath {}

impl Hash for FieldPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.segments.len());
        for segment in &self.segments {
            for part in [&segment.object, &segment.name] {
                for byte in part.bytes() {
                    state.write_u8(byte.to_ascii_lowercase());
                }
                state.write_u8(0xff);
            }
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Turns field names, dotted paths and field tokens into [`FieldPath`]s.
///
/// With a security checker attached, every resolved field is checked for
/// read access before it joins the path.
#[derive(Clone, Copy)]
pub struct PathResolver<'a> {
    schema: &'a dyn SchemaProvider,
    security: Option<&'a dyn SecurityChecker>,
}

impl<'a> PathResolver<'a> {
    pub fn new(schema: &'a dyn SchemaProvider) -> Self {
        Self {
            schema,
            security: None,
        }
    }

    /// Checks read access on every resolved field.
    #[must_use]
    pub fn with_security(mut self, checker: &'a dyn SecurityChecker) -> Self {
        self.security = Some(checker);
        self
    }

    /// Resolves a dotted path relative to `object`.
    ///
    /// Non-terminal segments may name either the reference field
    /// (`AccountId`) or its relationship (`Account`).
    pub fn resolve(&self, object: &str, path: &str) -> Result<FieldPath> {
        crate::relquery_profile_scope!("resolve", "field_path");

        let parts: SmallVec<[&str; 4]> = path.split('.').map(str::trim).collect();
        let last = parts.len() - 1;
        let mut current = CompactString::from(object);
        let mut segments = SmallVec::new();

        for (idx, part) in parts.iter().enumerate() {
            let terminal = idx == last;
            let field = self
                .lookup(&current, part, terminal)
                .ok_or_else(|| QueryError::invalid_field(&current, part))?;

            if terminal {
                self.check_readable(&field)?;
                segments.push(field);
                break;
            }

            let next = field
                .referenced_object()
                .ok_or_else(|| QueryError::non_reference_field(&current, &field.name))?;
            let next = CompactString::from(next);
            self.check_readable(&field)?;
            segments.push(field);
            current = next;
        }

        Ok(FieldPath::from_segments(segments))
    }

    /// Resolves a single field of `object`; dots are not interpreted.
    pub fn resolve_direct(&self, object: &str, name: &str) -> Result<FieldDescriptor> {
        let field = self
            .schema
            .resolve_field(object, name)
            .ok_or_else(|| QueryError::invalid_field(object, name))?;
        self.check_readable(&field)?;
        Ok(field)
    }

    /// Validates a pre-built chain of field tokens rooted at `object`.
    ///
    /// Each token must belong to the object the previous token references.
    pub fn resolve_tokens(&self, object: &str, tokens: &[FieldDescriptor]) -> Result<FieldPath> {
        if tokens.is_empty() {
            return Err(QueryError::invalid_field(object, ""));
        }

        let mut current: &str = object;
        for (idx, token) in tokens.iter().enumerate() {
            if !token.belongs_to(current) {
                return Err(QueryError::invalid_field(current, &token.name));
            }

            let Some(next) = tokens.get(idx + 1) else {
                self.check_readable(token)?;
                break;
            };

            if !token.is_reference() {
                return Err(QueryError::non_reference_field(current, &token.name));
            }
            self.check_readable(token)?;
            current = if token.references(&next.object) {
                next.object.as_str()
            } else {
                token.referenced_object().unwrap_or_default()
            };
        }

        Ok(FieldPath::from_segments(tokens.iter().cloned().collect()))
    }

    fn lookup(&self, object: &str, name: &str, terminal: bool) -> Option<FieldDescriptor> {
        if name.is_empty() {
            return None;
        }
        self.schema.resolve_field(object, name).or_else(|| {
            if terminal {
                return None;
            }
            self.schema
                .resolve_field(object, &id_field_name(name))
                .filter(FieldDescriptor::is_reference)
        })
    }

    fn check_readable(&self, field: &FieldDescriptor) -> Result<()> {
        match self.security {
            Some(checker) => checker.check_field_readable(&field.object, &field.name),
            None => Ok(()),
        }
    }
}
