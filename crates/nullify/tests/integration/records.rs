//! Records embedding wrappers as serde fields

use nullify::prelude::*;
use nullify::types::{Bool, Byte, Float64, Int8, Int16, Json, String as NullString, Time, Uint32, Uuid};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Account {
    #[serde(default)]
    id: Uuid,
    #[serde(default)]
    name: NullString,
    #[serde(default)]
    active: Bool,
    #[serde(default)]
    balance: Float64,
    #[serde(default)]
    age: Uint32,
    #[serde(default)]
    initial: Byte,
    #[serde(default)]
    settings: Json,
    #[serde(default)]
    created_at: Time,
}

const ZEROS: &str = concat!(
    r#"{"id":"00000000-0000-0000-0000-000000000000","#,
    r#""name":"","active":false,"balance":0.0,"age":0,"initial":"","#,
    r#""settings":{},"created_at":"1970-01-01T00:00:00Z"}"#,
);

const NULLS: &str = concat!(
    r#"{"id":null,"name":null,"active":null,"balance":null,"age":null,"#,
    r#""initial":null,"settings":null,"created_at":null}"#,
);

#[test]
fn test_zero_values_stay_present() {
    let account: Account = serde_json::from_str(ZEROS).unwrap();

    assert!(account.id.is_valid() && account.id.is_zero());
    assert!(account.name.is_valid() && account.name.is_zero());
    assert!(account.active.is_valid() && account.active.is_zero());
    assert!(account.balance.is_valid() && account.balance.is_zero());
    assert!(account.age.is_valid() && account.age.is_zero());
    assert!(account.initial.is_valid() && account.initial.is_zero());
    assert!(account.created_at.is_valid() && account.created_at.is_zero());
    assert!(account.settings.is_valid());

    assert_eq!(serde_json::to_string(&account).unwrap(), ZEROS);
}

#[test]
fn test_missing_and_null_fields_are_absent() {
    let missing: Account = serde_json::from_str("{}").unwrap();
    let nulls: Account = serde_json::from_str(NULLS).unwrap();

    for account in [&missing, &nulls] {
        assert!(!account.id.is_valid());
        assert!(!account.name.is_valid());
        assert!(!account.active.is_valid());
        assert!(!account.balance.is_valid());
        assert!(!account.age.is_valid());
        assert!(!account.initial.is_valid());
        assert!(!account.settings.is_valid());
        assert!(!account.created_at.is_valid());
    }

    assert_eq!(serde_json::to_string(&missing).unwrap(), NULLS);
}

#[test]
fn test_serde_agrees_with_marshal_json() {
    let account: Account = serde_json::from_str(
        r#"{"id":"67e55044-10b1-426f-9247-bb680e5fe0c8","name":"ada","balance":1.5,"initial":"a"}"#,
    )
    .unwrap();

    assert_eq!(account.id.marshal_json().unwrap(), serde_json::to_vec(&account.id).unwrap());
    assert_eq!(account.name.marshal_json().unwrap(), serde_json::to_vec(&account.name).unwrap());
    assert_eq!(account.balance.marshal_json().unwrap(), serde_json::to_vec(&account.balance).unwrap());
    assert_eq!(account.initial.marshal_json().unwrap(), serde_json::to_vec(&account.initial).unwrap());
    assert_eq!(account.active.marshal_json().unwrap(), serde_json::to_vec(&account.active).unwrap());
}

#[test]
fn test_field_level_rejections() {
    #[derive(Debug, Deserialize)]
    struct Small {
        #[serde(default)]
        #[allow(dead_code)]
        value: Int8,
    }

    assert!(serde_json::from_str::<Small>(r#"{"value":300}"#).is_err());
    assert!(serde_json::from_str::<Account>(r#"{"initial":"ab"}"#).is_err());
    assert!(serde_json::from_str::<Account>(r#"{"age":-1}"#).is_err());
    assert!(serde_json::from_str::<Account>(r#"{"id":"not-a-uuid"}"#).is_err());
}

#[test]
fn test_settings_document_is_embedded_verbatim() {
    let account: Account =
        serde_json::from_str(r#"{"settings":{"theme":"dark","tabs":[1,2]}}"#).unwrap();
    assert_eq!(account.settings.as_bytes(), br#"{"theme":"dark","tabs":[1,2]}"#);

    let out = serde_json::to_value(&account).unwrap();
    assert_eq!(out["settings"]["tabs"][1], 2);
}

#[test]
fn test_equal_does_not_match_nulls() {
    let a = Int16::default();
    let b = Int16::default();
    assert!(!a.equal(&b));
    assert_eq!(a, b);

    assert!(Int16::from_value(0).equal(&Int16::from_value(0)));
    assert!(!Int16::from_value(0).equal(&Int16::default()));
}

#[test]
fn test_unmarshal_json_through_the_trait() {
    let mut account = Account::default();
    account.name.unmarshal_json(br#""grace""#).unwrap();
    account.age.unmarshal_json(b"36").unwrap();
    account.initial.unmarshal_json(br#""g""#).unwrap();

    assert_eq!(account.name.must_value(), "grace");
    assert_eq!(account.age.must_value(), 36);
    assert_eq!(account.initial.must_value(), b'g');

    let err = account.age.unmarshal_json(br#""36""#).unwrap_err();
    assert!(err.is_unmarshal());
    assert!(!account.age.is_valid());
}
