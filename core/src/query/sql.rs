//! Query string rendering.
//!
//! Every name was resolved when it was added to the builder, so rendering is
//! string assembly. The only check left is read access on the implicit `Id`
//! selected when nothing else was.

use core::fmt::Write;

use relquery_types::ID_FIELD;

use super::builder::QueryBuilder;
use crate::error::Result;

impl QueryBuilder<'_> {
    /// Renders the query.
    ///
    /// Fails only with [`QueryError::Authorization`](crate::QueryError) when
    /// no field was selected, field security is enforced, and `Id` is not
    /// readable on this builder's object or on a subquery's.
    pub fn to_query_string(&self) -> Result<String> {
        crate::relquery_profile_scope!("render", "query");

        let mut soql = String::with_capacity(128);
        self.write_query(&mut soql)?;

        crate::relquery_trace_query!(soql, self.fields.len());
        Ok(soql)
    }

    fn write_query(&self, soql: &mut String) -> Result<()> {
        soql.push_str("SELECT ");

        if self.fields.is_empty() {
            if self.enforce_field_security {
                self.security
                    .check_field_readable(&self.table, ID_FIELD)?;
            }
            soql.push_str(ID_FIELD);
        } else {
            for (i, path) in self.selected_fields().into_iter().enumerate() {
                if i > 0 {
                    soql.push_str(", ");
                }
                soql.push_str(path.as_str());
            }
        }

        // Child relationship subqueries
        for subquery in self.subselect_queries() {
            soql.push_str(", (");
            subquery.write_query(soql)?;
            soql.push(')');
        }

        // FROM: subqueries read from the relationship, not the object
        soql.push_str(" FROM ");
        match self.relationship.as_ref().and_then(|rel| rel.name()) {
            Some(name) => soql.push_str(name),
            None => soql.push_str(&self.table),
        }

        if let Some(condition) = self.condition.as_deref() {
            soql.push_str(" WHERE ");
            soql.push_str(condition);
        }

        if !self.orderings.is_empty() || !self.sort_expressions.is_empty() {
            soql.push_str(" ORDER BY ");
            let orderings = self.orderings.iter().map(|o| o as &dyn core::fmt::Display);
            let sorts = self
                .sort_expressions
                .iter()
                .map(|s| s as &dyn core::fmt::Display);
            for (i, entry) in orderings.chain(sorts).enumerate() {
                if i > 0 {
                    soql.push_str(", ");
                }
                let _ = write!(soql, "{entry}");
            }
        }

        if let Some(n) = self.limit {
            soql.push_str(" LIMIT ");
            let _ = write!(soql, "{n}");
        }

        if let Some(n) = self.offset {
            soql.push_str(" OFFSET ");
            let _ = write!(soql, "{n}");
        }

        Ok(())
    }
}
