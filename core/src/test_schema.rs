//! Fixture schema shared by unit tests.

use relquery_types::{FieldType, ObjectDescriptor};

use crate::schema::InMemorySchema;

pub(crate) fn fixture() -> InMemorySchema {
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
                .reference("OwnerId", ["User"], "Owner")
                .reference("ParentId", ["Account"], "Parent")
                .child_relationship("Contacts", "Contact", "AccountId")
                .child_relationship("Opportunities", "Opportunity", "AccountId")
                .child_relationship("ChildAccounts", "Account", "ParentId")
                .unnamed_child_relationship("Note", "ParentId"),
        )
        .with_object(
            ObjectDescriptor::new("Contact")
                .field("FirstName", FieldType::String)
                .field("LastName", FieldType::String)
                .field("Email", FieldType::Email)
                .reference("AccountId", ["Account"], "Account")
                .child_relationship("Cases", "Case", "ContactId"),
        )
        .with_object(
            ObjectDescriptor::new("Opportunity")
                .field("Name", FieldType::String)
                .field("Amount", FieldType::Currency)
                .reference("AccountId", ["Account"], "Account"),
        )
        .with_object(
            ObjectDescriptor::new("Case")
                .field("Subject", FieldType::String)
                .reference("ContactId", ["Contact"], "Contact"),
        )
        .with_object(
            ObjectDescriptor::new("Note")
                .field("Title", FieldType::String)
                .reference("ParentId", ["Account", "Contact"], "Parent"),
        )
        .with_object(
            ObjectDescriptor::new("Invoice__c")
                .field("Name", FieldType::String)
                .field("Total__c", FieldType::Currency)
                .reference("Account__c", ["Account"], "Account__r"),
        )
}
