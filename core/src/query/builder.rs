//! Core `QueryBuilder`: selection, filtering, ordering and subqueries.

use core::fmt;

use compact_str::CompactString;
use hashbrown::HashMap;
use relquery_types::{FieldDescriptor, RelationshipDescriptor};

use crate::error::{QueryError, Result};
use crate::field_set::FieldGrouping;
use crate::ordering::{NullsOrder, OrderBy, Ordering, SortExpression};
use crate::path::{FieldPath, PathResolver};
use crate::schema::SchemaProvider;
use crate::security::{AllowAll, SecurityChecker};

static ALLOW_ALL: AllowAll = AllowAll;

/// Builds one query against one object.
///
/// Mutators return `&mut Self` so calls chain; fallible ones wrap it in a
/// [`Result`] and leave the builder untouched on error.
///
/// A builder created through [`QueryBuilder::subselect_query`] is bound to a
/// child relationship, renders `FROM <relationship name>`, and cannot hold
/// subqueries of its own.
///
/// ```
/// use relquery_core::{InMemorySchema, OrderBy, QueryBuilder};
/// use relquery_types::{FieldType, ObjectDescriptor};
///
/// let schema = InMemorySchema::new()
///     .with_object(
///         ObjectDescriptor::new("Account")
///             .field("Name", FieldType::String)
///             .child_relationship("Contacts", "Contact", "AccountId"),
///     )
///     .with_object(
///         ObjectDescriptor::new("Contact")
///             .field("LastName", FieldType::String)
///             .reference("AccountId", ["Account"], "Account"),
///     );
///
/// let mut query = QueryBuilder::new(&schema, "Account");
/// query
///     .select_field("Name")?
///     .set_condition("Name LIKE 'A%'")
///     .set_limit(10)
///     .add_sort("Name", OrderBy::Asc)?;
/// query.subselect_query("Contact")?.select_field("LastName")?;
///
/// assert_eq!(
///     query.to_query_string()?,
///     "SELECT Name, (SELECT LastName FROM Contacts) FROM Account \
///      WHERE Name LIKE 'A%' ORDER BY Name ASC LIMIT 10"
/// );
/// # Ok::<(), relquery_core::QueryError>(())
/// ```
#[derive(Clone)]
pub struct QueryBuilder<'s> {
    pub(super) schema: &'s dyn SchemaProvider,
    pub(super) security: &'s dyn SecurityChecker,
    pub(super) table: CompactString,
    /// Selected paths mapped to their selection sequence number.
    pub(super) fields: HashMap<FieldPath, usize>,
    pub(super) condition: Option<String>,
    pub(super) limit: Option<u32>,
    pub(super) offset: Option<u32>,
    pub(super) orderings: Vec<Ordering>,
    pub(super) sort_expressions: Vec<SortExpression>,
    pub(super) enforce_field_security: bool,
    pub(super) sort_select_fields: bool,
    pub(super) relationship: Option<RelationshipDescriptor>,
    pub(super) subqueries: Option<Vec<QueryBuilder<'s>>>,
}

impl<'s> QueryBuilder<'s> {
    /// Creates a builder querying `table`.
    ///
    /// The table name is not validated; an unknown table simply resolves no
    /// fields.
    pub fn new(schema: &'s dyn SchemaProvider, table: impl Into<CompactString>) -> Self {
        Self {
            schema,
            security: &ALLOW_ALL,
            table: table.into(),
            fields: HashMap::new(),
            condition: None,
            limit: None,
            offset: None,
            orderings: Vec::new(),
            sort_expressions: Vec::new(),
            enforce_field_security: false,
            sort_select_fields: true,
            relationship: None,
            subqueries: None,
        }
    }

    /// Uses `checker` for read permission checks. Subqueries created
    /// afterwards share it.
    #[must_use]
    pub fn with_security(mut self, checker: &'s dyn SecurityChecker) -> Self {
        self.security = checker;
        self
    }

    fn for_relationship(&self, relationship: RelationshipDescriptor) -> Self {
        let mut child = Self::new(self.schema, relationship.child_object.clone());
        child.security = self.security;
        child.enforce_field_security = self.enforce_field_security;
        child.sort_select_fields = self.sort_select_fields;
        child.relationship = Some(relationship);
        child
    }

    /// Object this builder queries.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Relationship this builder is bound to, if it is a subquery.
    pub fn relationship(&self) -> Option<&RelationshipDescriptor> {
        self.relationship.as_ref()
    }

    pub fn is_subquery(&self) -> bool {
        self.relationship.is_some()
    }

    fn is_bound_to(&self, relationship: &RelationshipDescriptor) -> bool {
        self.relationship
            .as_ref()
            .is_some_and(|bound| bound.is_same_relationship(relationship))
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Checks read access on every field selected or sorted on from now on.
    ///
    /// Fields added before the switch are not re-checked.
    pub fn set_enforce_field_security(&mut self, enforce: bool) -> &mut Self {
        self.enforce_field_security = enforce;
        self
    }

    pub fn enforces_field_security(&self) -> bool {
        self.enforce_field_security
    }

    /// Renders fields sorted by path (the default) instead of in selection
    /// order.
    pub fn set_sort_select_fields(&mut self, sort: bool) -> &mut Self {
        self.sort_select_fields = sort;
        self
    }

    pub fn sorts_select_fields(&self) -> bool {
        self.sort_select_fields
    }

    /// Fails with [`QueryError::Authorization`] unless the queried object is
    /// readable. Checked regardless of field security enforcement.
    pub fn assert_is_accessible(&mut self) -> Result<&mut Self> {
        self.security.check_object_readable(&self.table)?;
        Ok(self)
    }

    fn resolver(&self) -> PathResolver<'s> {
        let resolver = PathResolver::new(self.schema);
        if self.enforce_field_security {
            resolver.with_security(self.security)
        } else {
            resolver
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    fn insert_paths(&mut self, paths: impl IntoIterator<Item = FieldPath>) {
        for path in paths {
            let seq = self.fields.len();
            self.fields.entry(path).or_insert(seq);
        }
    }

    /// Selects a field by name or dotted path, e.g. `Account.Owner.Name`.
    pub fn select_field(&mut self, name: &str) -> Result<&mut Self> {
        let path = self.resolver().resolve(&self.table, name)?;
        self.insert_paths([path]);
        Ok(self)
    }

    /// Selects a field by token. The token must belong to the queried object.
    pub fn select_field_token(&mut self, field: &FieldDescriptor) -> Result<&mut Self> {
        let path = self
            .resolver()
            .resolve_tokens(&self.table, core::slice::from_ref(field))?;
        self.insert_paths([path]);
        Ok(self)
    }

    /// Selects several fields by name or dotted path. Nothing is selected if
    /// any of them fails to resolve.
    pub fn select_fields<I, S>(&mut self, names: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolver = self.resolver();
        let paths = names
            .into_iter()
            .map(|name| resolver.resolve(&self.table, name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.insert_paths(paths);
        Ok(self)
    }

    /// Selects several fields by token. Nothing is selected if any token is
    /// rejected.
    pub fn select_field_tokens<'t, I>(&mut self, fields: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = &'t FieldDescriptor>,
    {
        let resolver = self.resolver();
        let paths = fields
            .into_iter()
            .map(|field| resolver.resolve_tokens(&self.table, core::slice::from_ref(field)))
            .collect::<Result<Vec<_>>>()?;
        self.insert_paths(paths);
        Ok(self)
    }

    /// Selects a cross-object field given as a chain of tokens, root first.
    pub fn select_field_path(&mut self, tokens: &[FieldDescriptor]) -> Result<&mut Self> {
        let path = self.resolver().resolve_tokens(&self.table, tokens)?;
        self.insert_paths([path]);
        Ok(self)
    }

    /// Selects every field of a field set.
    ///
    /// Fails with [`QueryError::InvalidFieldSet`] if the set is bound to
    /// another object, or if it contains a dotted path while
    /// `allow_cross_object` is `false`.
    pub fn select_field_set<G>(&mut self, field_set: &G, allow_cross_object: bool) -> Result<&mut Self>
    where
        G: FieldGrouping + ?Sized,
    {
        if !field_set.object().eq_ignore_ascii_case(&self.table) {
            return Err(QueryError::invalid_field_set(
                &self.table,
                field_set.name(),
                format!("field set is bound to {}", field_set.object()),
            ));
        }

        let resolver = self.resolver();
        let mut paths = Vec::new();
        for member in field_set.field_paths() {
            if !allow_cross_object && member.contains('.') {
                return Err(QueryError::invalid_field_set(
                    &self.table,
                    field_set.name(),
                    format!("cross-object field '{member}' is not allowed"),
                ));
            }
            paths.push(resolver.resolve(&self.table, &member)?);
        }
        self.insert_paths(paths);
        Ok(self)
    }

    /// Selected paths in render order.
    pub fn selected_fields(&self) -> Vec<&FieldPath> {
        let mut selected: Vec<(&FieldPath, usize)> =
            self.fields.iter().map(|(path, seq)| (path, *seq)).collect();
        if self.sort_select_fields {
            selected.sort_by(|(a, a_seq), (b, b_seq)| {
                let a = a.as_str().bytes().map(|c| c.to_ascii_lowercase());
                let b = b.as_str().bytes().map(|c| c.to_ascii_lowercase());
                a.cmp(b).then(a_seq.cmp(b_seq))
            });
        } else {
            selected.sort_by_key(|(_, seq)| *seq);
        }
        selected.into_iter().map(|(path, _)| path).collect()
    }

    /// Number of distinct selected paths.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_selected(&self, path: &FieldPath) -> bool {
        self.fields.contains_key(path)
    }

    // =========================================================================
    // Filter, limit and offset
    // =========================================================================

    /// Sets the WHERE expression, stored and rendered verbatim. A blank
    /// expression clears it.
    pub fn set_condition(&mut self, condition: impl Into<String>) -> &mut Self {
        let condition = condition.into();
        self.condition = (!condition.trim().is_empty()).then_some(condition);
        self
    }

    pub fn clear_condition(&mut self) -> &mut Self {
        self.condition = None;
        self
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Sets or, with `None`, removes the LIMIT.
    pub fn set_limit(&mut self, limit: impl Into<Option<u32>>) -> &mut Self {
        self.limit = limit.into();
        self
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Sets or, with `None`, removes the OFFSET.
    pub fn set_offset(&mut self, offset: impl Into<Option<u32>>) -> &mut Self {
        self.offset = offset.into();
        self
    }

    pub fn offset(&self) -> Option<u32> {
        self.offset
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    fn check_ordering(&self, ordering: &Ordering) -> Result<()> {
        let field = ordering.field();
        if !field.belongs_to(&self.table) {
            return Err(QueryError::invalid_field(&self.table, &field.name));
        }
        if self.enforce_field_security {
            self.security
                .check_field_readable(&field.object, &field.name)?;
        }
        Ok(())
    }

    /// Appends an ordering on a field of the queried object.
    pub fn add_ordering(&mut self, ordering: Ordering) -> Result<&mut Self> {
        self.check_ordering(&ordering)?;
        self.orderings.push(ordering);
        Ok(self)
    }

    /// Appends an ordering on a field of the queried object, by name.
    pub fn add_ordering_by_name(&mut self, field: &str, direction: OrderBy) -> Result<&mut Self> {
        let field = self.resolver().resolve_direct(&self.table, field)?;
        self.orderings.push(Ordering::new(field, direction));
        Ok(self)
    }

    /// Like [`QueryBuilder::add_ordering_by_name`] with explicit null placement.
    pub fn add_ordering_with_nulls(
        &mut self,
        field: &str,
        direction: OrderBy,
        nulls: NullsOrder,
    ) -> Result<&mut Self> {
        let field = self.resolver().resolve_direct(&self.table, field)?;
        self.orderings
            .push(Ordering::new(field, direction).with_nulls(nulls));
        Ok(self)
    }

    /// Replaces all orderings.
    pub fn set_ordering(&mut self, orderings: Vec<Ordering>) -> Result<&mut Self> {
        for ordering in &orderings {
            self.check_ordering(ordering)?;
        }
        self.orderings = orderings;
        Ok(self)
    }

    pub fn orderings(&self) -> &[Ordering] {
        &self.orderings
    }

    /// Appends a sort on a field name or dotted path.
    pub fn add_sort(&mut self, path: &str, direction: OrderBy) -> Result<&mut Self> {
        let path = self.resolver().resolve(&self.table, path)?;
        self.sort_expressions
            .push(SortExpression::new(path, direction));
        Ok(self)
    }

    /// Like [`QueryBuilder::add_sort`] with explicit null placement.
    pub fn add_sort_with_nulls(
        &mut self,
        path: &str,
        direction: OrderBy,
        nulls: NullsOrder,
    ) -> Result<&mut Self> {
        let path = self.resolver().resolve(&self.table, path)?;
        self.sort_expressions
            .push(SortExpression::new(path, direction).with_nulls(nulls));
        Ok(self)
    }

    /// Appends a sort on an already resolved path rooted at the queried object.
    pub fn add_sort_by_path(&mut self, path: FieldPath, direction: OrderBy) -> Result<&mut Self> {
        let path = self
            .resolver()
            .resolve_tokens(&self.table, path.segments())?;
        self.sort_expressions
            .push(SortExpression::new(path, direction));
        Ok(self)
    }

    pub fn sort_expressions(&self) -> &[SortExpression] {
        &self.sort_expressions
    }

    // =========================================================================
    // Subqueries
    // =========================================================================

    fn ensure_not_subquery(&self, relationship: &str) -> Result<()> {
        if self.relationship.is_some() {
            return Err(QueryError::invalid_subquery(
                &self.table,
                relationship,
                "subqueries cannot be nested inside a subquery",
            ));
        }
        Ok(())
    }

    /// Returns the subquery over the first named child relationship of the
    /// queried object whose child is `child_object`, creating it on first use.
    ///
    /// Unnamed relationships to the same child are skipped.
    pub fn subselect_query(&mut self, child_object: &str) -> Result<&mut QueryBuilder<'s>> {
        self.ensure_not_subquery(child_object)?;
        let relationships = self.schema.child_relationships(&self.table);
        let mut matching = relationships
            .iter()
            .filter(|rel| rel.child_object.eq_ignore_ascii_case(child_object))
            .peekable();
        if matching.peek().is_none() {
            return Err(QueryError::invalid_subquery(
                &self.table,
                child_object,
                format!("{child_object} is not a child of {}", self.table),
            ));
        }
        let relationship = matching
            .find(|rel| rel.name().is_some())
            .cloned()
            .ok_or_else(|| {
                QueryError::invalid_subquery(
                    &self.table,
                    child_object,
                    "relationship has no name",
                )
            })?;
        self.set_subselect_query(&relationship)
    }

    /// Returns the subquery over the child relationship named
    /// `relationship_name`, creating it on first use.
    pub fn subselect_query_by_name(
        &mut self,
        relationship_name: &str,
    ) -> Result<&mut QueryBuilder<'s>> {
        self.ensure_not_subquery(relationship_name)?;
        let relationship = self
            .schema
            .child_relationships(&self.table)
            .into_iter()
            .find(|rel| {
                rel.name()
                    .is_some_and(|name| name.eq_ignore_ascii_case(relationship_name))
            })
            .ok_or_else(|| {
                QueryError::invalid_subquery(
                    &self.table,
                    relationship_name,
                    format!("no child relationship of {} has this name", self.table),
                )
            })?;
        self.set_subselect_query(&relationship)
    }

    /// Returns the subquery over `relationship`, creating it on first use.
    ///
    /// Repeated calls for the same relationship return the same builder.
    /// Fails with [`QueryError::InvalidSubqueryRelationship`] if this builder
    /// is itself a subquery, or if `relationship` has no name or is not
    /// declared on the queried object.
    pub fn set_subselect_query(
        &mut self,
        relationship: &RelationshipDescriptor,
    ) -> Result<&mut QueryBuilder<'s>> {
        let label = relationship
            .name()
            .unwrap_or(relationship.child_object.as_str());
        self.ensure_not_subquery(label)?;

        if relationship.name().is_none() {
            return Err(QueryError::invalid_subquery(
                &self.table,
                label,
                "relationship has no name",
            ));
        }
        let declared = self
            .schema
            .child_relationships(&self.table)
            .iter()
            .any(|rel| rel.is_same_relationship(relationship));
        if !declared {
            return Err(QueryError::invalid_subquery(
                &self.table,
                label,
                format!("relationship is not declared on {}", self.table),
            ));
        }

        let position = self
            .subqueries
            .as_ref()
            .and_then(|subs| subs.iter().position(|sub| sub.is_bound_to(relationship)));
        if let Some(idx) = position {
            return Ok(&mut self.subqueries.get_or_insert_with(Vec::new)[idx]);
        }

        crate::relquery_trace_subquery!(self.table, label);
        let child = self.for_relationship(relationship.clone());
        let subqueries = self.subqueries.get_or_insert_with(Vec::new);
        subqueries.push(child);
        let idx = subqueries.len() - 1;
        Ok(&mut subqueries[idx])
    }

    /// Subqueries in creation order.
    pub fn subselect_queries(&self) -> &[QueryBuilder<'s>] {
        self.subqueries.as_deref().unwrap_or_default()
    }

    /// The subquery bound to the relationship named `relationship_name`.
    pub fn subselect_query_for(&self, relationship_name: &str) -> Option<&QueryBuilder<'s>> {
        self.subselect_queries().iter().find(|sub| {
            sub.relationship
                .as_ref()
                .and_then(RelationshipDescriptor::name)
                .is_some_and(|name| name.eq_ignore_ascii_case(relationship_name))
        })
    }
}

impl fmt::Debug for QueryBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("table", &self.table)
            .field("fields", &self.selected_fields())
            .field("condition", &self.condition)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .field("orderings", &self.orderings)
            .field("sort_expressions", &self.sort_expressions)
            .field("enforce_field_security", &self.enforce_field_security)
            .field("relationship", &self.relationship)
            .field("subqueries", &self.subqueries)
            .finish_non_exhaustive()
    }
}

/// Builders are equal when they query the same object, select the same
/// number of fields and render the same string. A builder that fails to
/// render equals nothing.
impl PartialEq for QueryBuilder<'_> {
    fn eq(&self, other: &Self) -> bool {
        if !self.table.eq_ignore_ascii_case(&other.table)
            || self.fields.len() != other.fields.len()
        {
            return false;
        }
        match (self.to_query_string(), other.to_query_string()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
