use common::schema;
use relquery::prelude::*;

mod common;

#[test]
fn field_set_members_are_selected() {
    let schema = schema();
    let summary = FieldSet::new("Summary", "Contact").with_fields(["LastName", "FirstName", "Email"]);

    let mut query = QueryBuilder::new(&schema, "Contact");
    query.select_field_set(&summary, false).unwrap();
    assert_eq!(
        query.to_query_string().unwrap(),
        "SELECT Email, FirstName, LastName FROM Contact"
    );
}

#[test]
fn cross_object_members_need_permission() {
    let schema = schema();
    let with_owner = FieldSet::new("WithOwner", "Account").with_fields(["Name", "Owner.Name"]);

    let mut query = QueryBuilder::new(&schema, "Account");
    let err = query.select_field_set(&with_owner, false).unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::InvalidFieldSet);
    assert_eq!(
        err.to_string(),
        "Invalid field set 'WithOwner' for Account: cross-object field 'Owner.Name' is not allowed"
    );
    assert_eq!(query.field_count(), 0);

    query.select_field_set(&with_owner, true).unwrap();
    assert_eq!(
        query.to_query_string().unwrap(),
        "SELECT Name, Owner.Name FROM Account"
    );
}

#[test]
fn invalid_member_fails_the_whole_set() {
    let schema = schema();
    let stale = FieldSet::new("Stale", "Opportunity").with_fields(["Name", "Probability"]);

    let mut query = QueryBuilder::new(&schema, "Opportunity");
    let err = query.select_field_set(&stale, true).unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::InvalidField);
    assert_eq!(query.field_count(), 0);
}

#[test]
fn set_bound_to_another_object() {
    let schema = schema();
    let cases = FieldSet::new("CaseColumns", "Case").with_fields(["Subject"]);

    let mut query = QueryBuilder::new(&schema, "Contact");
    let err = query.select_field_set(&cases, true).unwrap_err();
    assert_eq!(err.kind(), QueryErrorKind::InvalidFieldSet);

    // Usable on the matching subquery
    query
        .subselect_query("Case")
        .unwrap()
        .select_field_set(&cases, false)
        .unwrap();
    assert_eq!(
        query.to_query_string().unwrap(),
        "SELECT Id, (SELECT Subject FROM Cases) FROM Contact"
    );
}

#[test]
fn custom_grouping() {
    struct Currency;

    impl FieldGrouping for Currency {
        fn name(&self) -> &str {
            "Currency"
        }

        fn object(&self) -> &str {
            "Line_Item__c"
        }

        fn field_paths(&self) -> Vec<relquery::types::CompactString> {
            vec!["Unit_Price__c".into(), "Invoice__r.Total__c".into()]
        }
    }

    let schema = schema();
    let mut query = QueryBuilder::new(&schema, "Line_Item__c");
    query.select_field_set(&Currency, true).unwrap();
    assert_eq!(
        query.to_query_string().unwrap(),
        "SELECT Invoice__r.Total__c, Unit_Price__c FROM Line_Item__c"
    );
}
