//! Conversions between reference field names and relationship names.
//!
//! A reference field is stored under its id name (`AccountId`, `Invoice__c`)
//! but traversed under its relationship name (`Account`, `Invoice__r`).

use compact_str::{CompactString, format_compact};

const CUSTOM_FIELD_SUFFIX: &str = "__c";
const CUSTOM_RELATIONSHIP_SUFFIX: &str = "__r";
const ID_SUFFIX: &str = "Id";

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(split) {
        return None;
    }
    let (base, tail) = name.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(base)
}

/// Derives the relationship name used to traverse a reference field.
///
/// ```
/// use relquery_types::relationship_name;
///
/// assert_eq!(relationship_name("AccountId"), "Account");
/// assert_eq!(relationship_name("Invoice__c"), "Invoice__r");
/// assert_eq!(relationship_name("Parent"), "Parent");
/// ```
pub fn relationship_name(field_name: &str) -> CompactString {
    if let Some(base) = strip_suffix_ignore_case(field_name, CUSTOM_FIELD_SUFFIX) {
        return format_compact!("{base}{CUSTOM_RELATIONSHIP_SUFFIX}");
    }
    match strip_suffix_ignore_case(field_name, ID_SUFFIX) {
        Some(base) if !base.is_empty() => CompactString::from(base),
        _ => CompactString::from(field_name),
    }
}

/// Inverse of [`relationship_name`]: the id field name a relationship name
/// most likely belongs to.
///
/// ```
/// use relquery_types::id_field_name;
///
/// assert_eq!(id_field_name("Account"), "AccountId");
/// assert_eq!(id_field_name("Invoice__r"), "Invoice__c");
/// ```
pub fn id_field_name(relationship: &str) -> CompactString {
    match strip_suffix_ignore_case(relationship, CUSTOM_RELATIONSHIP_SUFFIX) {
        Some(base) => format_compact!("{base}{CUSTOM_FIELD_SUFFIX}"),
        None => format_compact!("{relationship}{ID_SUFFIX}"),
    }
}
