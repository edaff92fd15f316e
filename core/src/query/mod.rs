//! Query builder.
//!
//! A [`QueryBuilder`] accumulates a field selection, a filter, orderings, a
//! limit and offset, and up to one level of child relationship subqueries,
//! then renders them into one query string:
//!
//! ```text
//! SELECT <fields>, (<subquery>)... FROM <table> [WHERE ..] [ORDER BY ..] [LIMIT n] [OFFSET n]
//! ```
//!
//! Every field name is resolved against the schema when it is added, so
//! rendering only fails for the implicit `Id` fallback under field security
//! enforcement.

mod builder;
mod sql;

pub use builder::QueryBuilder;
