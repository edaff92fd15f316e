use common::{schema, select_list};
use relquery::prelude::*;

mod common;

#[test]
fn single_field() {
    let schema = schema();
    let mut query = QueryBuilder::new(&schema, "Account");
    query.select_field("Name").unwrap();

    let soql = query.to_query_string().unwrap();
    assert!(soql.contains("SELECT Name"));
    assert!(soql.contains("FROM Account"));
    assert_eq!(soql, "SELECT Name FROM Account");
}

#[test]
fn selection_is_idempotent() {
    let schema = schema();
    let mut once = QueryBuilder::new(&schema, "Contact");
    once.select_field("LastName").unwrap();

    let mut twice = QueryBuilder::new(&schema, "Contact");
    twice
        .select_field("LastName")
        .unwrap()
        .select_field("lastname")
        .unwrap();

    assert_eq!(twice.field_count(), 1);
    assert_eq!(
        once.to_query_string().unwrap(),
        twice.to_query_string().unwrap()
    );
}

#[test]
fn token_and_name_selections_share_one_entry() {
    let schema = schema();
    let last_name = schema.resolve_field("Contact", "LastName").unwrap();

    let mut query = QueryBuilder::new(&schema, "Contact");
    query
        .select_field_token(&last_name)
        .unwrap()
        .select_field("lastname")
        .unwrap();

    assert_eq!(query.field_count(), 1);
    assert_eq!(query.to_query_string().unwrap(), "SELECT LastName FROM Contact");
}

#[test]
fn token_chain_and_dotted_name_share_one_entry() {
    let schema = schema();
    let account_id = schema.resolve_field("Contact", "AccountId").unwrap();
    let name = schema.resolve_field("Account", "Name").unwrap();

    let mut query = QueryBuilder::new(&schema, "Contact");
    query
        .select_field_path(&[account_id, name])
        .unwrap()
        .select_field("Account.Name")
        .unwrap()
        .select_field("accountid.NAME")
        .unwrap();

    assert_eq!(query.field_count(), 1);
    assert_eq!(query.to_query_string().unwrap(), "SELECT Account.Name FROM Contact");
}

#[test]
fn fields_render_sorted_by_default() {
    let schema = schema();
    let mut query = QueryBuilder::new(&schema, "Contact");
    query
        .select_fields(["LastName", "Account.Name", "Email", "FirstName"])
        .unwrap();

    assert_eq!(
        query.to_query_string().unwrap(),
        "SELECT Account.Name, Email, FirstName, LastName FROM Contact"
    );
}

#[test]
fn fields_render_in_selection_order_when_unsorted() {
    let schema = schema();
    let mut query = QueryBuilder::new(&schema, "Contact");
    query
        .set_sort_select_fields(false)
        .select_fields(["LastName", "Account.Name", "Email"])
        .unwrap();

    let soql = query.to_query_string().unwrap();
    assert_eq!(select_list(&soql), ["LastName", "Account.Name", "Email"]);
}

#[test]
fn cross_object_paths() {
    let schema = schema();
    let mut query = QueryBuilder::new(&schema, "Case");
    query
        .select_field("Contact.Account.Owner.Manager.Name")
        .unwrap()
        .select_field("ContactId.AccountId.Name")
        .unwrap();

    let soql = query.to_query_string().unwrap();
    let mut fields = select_list(&soql);
    fields.sort_unstable();
    assert_eq!(
        fields,
        ["Contact.Account.Name", "Contact.Account.Owner.Manager.Name"]
    );
}

#[test]
fn custom_reference_uses_relationship_suffix() {
    let schema = schema();
    let mut query = QueryBuilder::new(&schema, "Line_Item__c");
    query
        .select_field("Invoice__c.Account__c.Name")
        .unwrap()
        .select_field("Invoice__r.Total__c")
        .unwrap();

    assert_eq!(
        query.to_query_string().unwrap(),
        "SELECT Invoice__r.Account__r.Name, Invoice__r.Total__c FROM Line_Item__c"
    );
}

#[test]
fn unknown_field_is_rejected() {
    let schema = schema();
    let mut query = QueryBuilder::new(&schema, "Account");

    let err = query.select_field("Nmae").unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::InvalidField);
    assert_eq!(err.to_string(), "Invalid field 'Nmae' on Account");

    let err = query.select_field("Owner.Nmae").unwrap_err();
    assert_eq!(err, QueryError::InvalidField {
        object: "User".into(),
        field: "Nmae".into(),
    });
    assert_eq!(query.field_count(), 0);
}

#[test]
fn traversing_a_non_reference_field_is_rejected() {
    let schema = schema();
    let mut query = QueryBuilder::new(&schema, "Account");

    let err = query.select_field("Name.Foo").unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::NonReferenceField);
    assert_eq!(err, QueryError::NonReferenceField {
        object: "Account".into(),
        field: "Name".into(),
    });
}

#[test]
fn token_selection() {
    let schema = schema();
    let account_name = schema.resolve_field("Account", "Name").unwrap();
    let owner = schema.resolve_field("Contact", "AccountId").unwrap();

    let mut query = QueryBuilder::new(&schema, "Contact");
    query.select_field_path(&[owner, account_name.clone()]).unwrap();
    assert_eq!(query.to_query_string().unwrap(), "SELECT Account.Name FROM Contact");

    // A token must belong to the queried object
    let err = query.select_field_token(&account_name).unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::InvalidField);
}

#[test]
fn token_batch_is_all_or_nothing() {
    let schema = schema();
    let first = schema.resolve_field("Contact", "FirstName").unwrap();
    let stranger = schema.resolve_field("Opportunity", "Amount").unwrap();

    let mut query = QueryBuilder::new(&schema, "Contact");
    let err = query.select_field_tokens([&first, &stranger]).unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::InvalidField);
    assert_eq!(query.field_count(), 0);

    query.select_field_tokens([&first]).unwrap();
    assert_eq!(query.to_query_string().unwrap(), "SELECT FirstName FROM Contact");
}

#[test]
fn condition_limit_and_offset() {
    let schema = schema();
    let mut query = QueryBuilder::new(&schema, "Opportunity");
    query
        .select_field("Name")
        .unwrap()
        .set_condition("StageName = 'Closed Won' AND Amount > 1000")
        .set_limit(20)
        .set_offset(40);

    assert_eq!(query.condition(), Some("StageName = 'Closed Won' AND Amount > 1000"));
    assert_eq!(query.limit(), Some(20));
    assert_eq!(query.offset(), Some(40));
    assert_eq!(
        query.to_query_string().unwrap(),
        "SELECT Name FROM Opportunity WHERE StageName = 'Closed Won' AND Amount > 1000 \
         LIMIT 20 OFFSET 40"
    );

    query.clear_condition().set_limit(None).set_offset(None);
    assert_eq!(query.to_query_string().unwrap(), "SELECT Name FROM Opportunity");
}

#[test]
fn empty_selection_selects_id() {
    let schema = schema();
    let query = QueryBuilder::new(&schema, "Invoice__c");
    assert_eq!(query.to_query_string().unwrap(), "SELECT Id FROM Invoice__c");
}

#[test]
fn cached_schema_serves_repeat_lookups() {
    let schema = CachedSchema::new(schema());
    let mut query = QueryBuilder::new(&schema, "Contact");
    query
        .select_fields(["Account.Name", "Account.Industry", "LastName"])
        .unwrap();

    assert_eq!(
        query.to_query_string().unwrap(),
        "SELECT Account.Industry, Account.Name, LastName FROM Contact"
    );
    assert!(schema.cached_fields() >= 4);
}
