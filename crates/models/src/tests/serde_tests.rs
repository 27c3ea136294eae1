use serde_json::json;

use crate::{Member, MemberStatus, Role, User, UserTable};

#[test]
fn member_document_shape() {
    let doc = json!({
        "member_id": "543210987",
        "name": "Jane Smith",
        "status": "Expired",
        "address": "456 Elm St",
        "city": "Othertown",
        "state": "NY",
        "zip": "67890"
    });
    let m: Member = serde_json::from_value(doc).unwrap();
    assert_eq!(m.status, MemberStatus::Expired);
    assert!(m.is_expired());
}

#[test]
fn unknown_status_is_rejected() {
    let doc = json!({
        "member_id": "1", "name": "x", "status": "Suspended",
        "address": "a", "city": "c", "state": "CA", "zip": "12345"
    });
    assert!(serde_json::from_value::<Member>(doc).is_err());
}

#[test]
fn user_table_keeps_insertion_order() {
    let doc = r#"{
        "manager": {"username": "manager", "password": "manager123", "role": "manager"},
        "provider": {"username": "quinn", "password": "quinn123", "role": "provider"},
        "mjin": {"username": "Mjin", "password": "Mjin123", "role": "manager"}
    }"#;
    let table: UserTable = serde_json::from_str(doc).unwrap();
    let keys: Vec<&str> = table.keys().map(String::as_str).collect();
    assert_eq!(keys, ["manager", "provider", "mjin"]);
    assert_eq!(table["provider"], User::new("quinn", "quinn123", Role::Provider));

    let out = serde_json::to_string(&table).unwrap();
    assert!(out.find("\"manager\"").unwrap() < out.find("\"mjin\"").unwrap());
}
