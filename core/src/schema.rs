//! Schema description capability.
//!
//! The builder never inspects a schema directly; it asks a [`SchemaProvider`]
//! to resolve field names and list child relationships. Two providers ship
//! here: [`InMemorySchema`], assembled from [`ObjectDescriptor`]s, and
//! [`CachedSchema`], which memoizes lookups on top of any other provider.

use core::cell::RefCell;

use compact_str::CompactString;
use hashbrown::HashMap;
use relquery_types::{FieldDescriptor, ObjectDescriptor, RelationshipDescriptor};

/// Resolves names against a schema.
///
/// Lookups ignore ASCII case; returned descriptors carry the schema's own
/// casing.
pub trait SchemaProvider {
    /// Resolves `name` to a field of `object`.
    fn resolve_field(&self, object: &str, name: &str) -> Option<FieldDescriptor>;

    /// Lists the child relationships declared on `object`, in declaration order.
    fn child_relationships(&self, object: &str) -> Vec<RelationshipDescriptor>;
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for &P {
    fn resolve_field(&self, object: &str, name: &str) -> Option<FieldDescriptor> {
        (**self).resolve_field(object, name)
    }

    fn child_relationships(&self, object: &str) -> Vec<RelationshipDescriptor> {
        (**self).child_relationships(object)
    }
}

pub(crate) fn fold_case(name: &str) -> CompactString {
    let mut key = CompactString::from(name);
    key.make_ascii_lowercase();
    key
}

#[derive(Debug, Clone)]
struct ObjectEntry {
    descriptor: ObjectDescriptor,
    fields: HashMap<CompactString, usize>,
}

impl ObjectEntry {
    fn new(descriptor: ObjectDescriptor) -> Self {
        let fields = descriptor
            .fields
            .iter()
            .enumerate()
            .map(|(idx, field)| (fold_case(&field.name), idx))
            .collect();
        Self { descriptor, fields }
    }
}

/// A schema held entirely in memory.
///
/// ```
/// use relquery_core::{InMemorySchema, SchemaProvider};
/// use relquery_types::{FieldType, ObjectDescriptor};
///
/// let schema = InMemorySchema::new()
///     .with_object(ObjectDescriptor::new("Account").field("Name", FieldType::String));
///
/// let name = schema.resolve_field("account", "NAME").unwrap();
/// assert_eq!(name.name, "Name");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySchema {
    objects: HashMap<CompactString, ObjectEntry>,
}

impl InMemorySchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object, replacing any object of the same name.
    #[must_use]
    pub fn with_object(mut self, object: ObjectDescriptor) -> Self {
        self.insert(object);
        self
    }

    /// Adds an object, replacing any object of the same name.
    pub fn insert(&mut self, mut object: ObjectDescriptor) {
        object.normalize();
        self.objects
            .insert(fold_case(&object.name), ObjectEntry::new(object));
    }

    /// Returns the descriptor registered for `name`.
    pub fn object(&self, name: &str) -> Option<&ObjectDescriptor> {
        self.objects.get(&fold_case(name)).map(|entry| &entry.descriptor)
    }

    /// Returns `true` if an object named `name` is registered.
    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(&fold_case(name))
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Loads a schema from a JSON document of the form
    /// `{"objects": [{"name": ..., "fields": [...], "child_relationships": [...]}]}`.
    ///
    /// Nested fields and relationships may omit their owning object.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, SchemaLoadError> {
        let document: SchemaDocument = serde_json::from_str(json)?;
        let mut schema = Self::new();
        for object in document.objects {
            if schema.has_object(&object.name) {
                return Err(SchemaLoadError::DuplicateObject(object.name.into()));
            }
            schema.insert(object);
        }
        Ok(schema)
    }
}

impl SchemaProvider for InMemorySchema {
    fn resolve_field(&self, object: &str, name: &str) -> Option<FieldDescriptor> {
        let entry = self.objects.get(&fold_case(object))?;
        let idx = *entry.fields.get(&fold_case(name))?;
        entry.descriptor.fields.get(idx).cloned()
    }

    fn child_relationships(&self, object: &str) -> Vec<RelationshipDescriptor> {
        self.objects
            .get(&fold_case(object))
            .map(|entry| entry.descriptor.child_relationships.clone())
            .unwrap_or_default()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SchemaDocument {
    objects: Vec<ObjectDescriptor>,
}

/// Error loading a schema document.
#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
pub enum SchemaLoadError {
    /// The document is not valid JSON or does not match the expected shape
    #[error("Invalid schema document: {0}")]
    Json(#[from] serde_json::Error),

    /// Two objects share a name
    #[error("Duplicate object '{0}' in schema document")]
    DuplicateObject(String),
}

type FieldKey = (CompactString, CompactString);

/// Memoizes field and relationship lookups of another provider.
///
/// Misses are cached too, so an unknown name costs one lookup on the inner
/// provider. Not thread-safe; each builder runs on one thread.
#[derive(Debug)]
pub struct CachedSchema<P> {
    inner: P,
    fields: RefCell<HashMap<FieldKey, Option<FieldDescriptor>>>,
    relationships: RefCell<HashMap<CompactString, Vec<RelationshipDescriptor>>>,
}

impl<P: SchemaProvider> CachedSchema<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            fields: RefCell::new(HashMap::new()),
            relationships: RefCell::new(HashMap::new()),
        }
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of cached field lookups, hits and misses alike.
    pub fn cached_fields(&self) -> usize {
        self.fields.borrow().len()
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.fields.borrow_mut().clear();
        self.relationships.borrow_mut().clear();
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: SchemaProvider> SchemaProvider for CachedSchema<P> {
    fn resolve_field(&self, object: &str, name: &str) -> Option<FieldDescriptor> {
        let key = (fold_case(object), fold_case(name));
        let cached = self.fields.borrow().get(&key).cloned();
        if let Some(hit) = cached {
            return hit;
        }
        let resolved = self.inner.resolve_field(object, name);
        self.fields.borrow_mut().insert(key, resolved.clone());
        resolved
    }

    fn child_relationships(&self, object: &str) -> Vec<RelationshipDescriptor> {
        let key = fold_case(object);
        let cached = self.relationships.borrow().get(&key).cloned();
        if let Some(hit) = cached {
            return hit;
        }
        let resolved = self.inner.child_relationships(object);
        self.relationships.borrow_mut().insert(key, resolved.clone());
        resolved
    }
}
