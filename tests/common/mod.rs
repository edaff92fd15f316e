#![allow(dead_code)]

use relquery::prelude::*;

/// Sales org schema shared by the integration tests.
///
/// ```text
/// User ──< Account ──< Contact ──< Case
///            │  └────< Opportunity
///            └───────< Invoice__c ──< Line_Item__c
/// ```
pub fn schema() -> InMemorySchema {
    InMemorySchema::new()
        .with_object(
            ObjectDescriptor::new("User")
                .field("Name", FieldType::String)
                .field("Email", FieldType::Email)
                .reference("ManagerId", ["User"], "Manager"),
        )
        .with_object(
            ObjectDescriptor::new("Account")
                .field("Name", FieldType::String)
                .field("Industry", FieldType::Picklist)
                .field("AnnualRevenue", FieldType::Currency)
                .field("Rating", FieldType::Picklist)
                .reference("OwnerId", ["User"], "Owner")
                .reference("ParentId", ["Account"], "Parent")
                .child_relationship("Contacts", "Contact", "AccountId")
                .child_relationship("Opportunities", "Opportunity", "AccountId")
                .child_relationship("ChildAccounts", "Account", "ParentId")
                .child_relationship("Invoices__r", "Invoice__c", "Account__c"),
        )
        .with_object(
            ObjectDescriptor::new("Contact")
                .field("FirstName", FieldType::String)
                .field("LastName", FieldType::String)
                .field("Email", FieldType::Email)
                .field("Birthdate", FieldType::Date)
                .reference("AccountId", ["Account"], "Account")
                .reference("ReportsToId", ["Contact"], "ReportsTo")
                .child_relationship("Cases", "Case", "ContactId"),
        )
        .with_object(
            ObjectDescriptor::new("Opportunity")
                .field("Name", FieldType::String)
                .field("Amount", FieldType::Currency)
                .field("CloseDate", FieldType::Date)
                .field("StageName", FieldType::Picklist)
                .reference("AccountId", ["Account"], "Account"),
        )
        .with_object(
            ObjectDescriptor::new("Case")
                .field("Subject", FieldType::String)
                .field("Status", FieldType::Picklist)
                .reference("ContactId", ["Contact"], "Contact"),
        )
        .with_object(
            ObjectDescriptor::new("Invoice__c")
                .field("Name", FieldType::String)
                .field("Total__c", FieldType::Currency)
                .reference("Account__c", ["Account"], "Account__r")
                .child_relationship("Line_Items__r", "Line_Item__c", "Invoice__c"),
        )
        .with_object(
            ObjectDescriptor::new("Line_Item__c")
                .field("Quantity__c", FieldType::Double)
                .field("Unit_Price__c", FieldType::Currency)
                .reference("Invoice__c", ["Invoice__c"], "Invoice__r"),
        )
}

/// Splits the SELECT list of a rendered query that has no subqueries.
pub fn select_list(soql: &str) -> Vec<&str> {
    let list = soql
        .strip_prefix("SELECT ")
        .and_then(|rest| rest.split(" FROM ").next())
        .unwrap_or_default();
    list.split(", ").collect()
}
