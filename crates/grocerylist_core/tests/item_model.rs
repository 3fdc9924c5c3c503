use grocerylist_core::{
    Item, ItemPatch, ItemValidationError, NewItem, DEFAULT_NAME, DEFAULT_STORE, PRIORITY_MIN,
};

fn sample_fields() -> NewItem {
    NewItem {
        name: "milk".to_string(),
        store: "H.E.B.".to_string(),
        cost: 3.19,
        amount: 2,
        priority: 1,
        buy: true,
    }
}

#[test]
fn default_item_matches_documented_defaults() {
    let item = Item::default();

    assert_eq!(item.name, DEFAULT_NAME);
    assert_eq!(item.store, DEFAULT_STORE);
    assert_eq!(item.cost, 0.0);
    assert_eq!(item.amount, 1);
    assert_eq!(item.priority, PRIORITY_MIN);
    assert!(item.buy);
    assert_eq!(item.id, 0);
}

#[test]
fn new_generates_distinct_nonzero_ids() {
    let first = Item::new(sample_fields()).unwrap();
    let second = Item::new(sample_fields()).unwrap();

    assert_ne!(first.id, 0);
    assert_ne!(second.id, 0);
    assert_ne!(first.id, second.id);
}

#[test]
fn validation_rejects_empty_name() {
    let err = Item::with_id(
        1,
        NewItem {
            name: String::new(),
            ..sample_fields()
        },
    )
    .unwrap_err();
    assert_eq!(err, ItemValidationError::EmptyName);
}

#[test]
fn validation_rejects_zero_amount() {
    let err = Item::with_id(
        1,
        NewItem {
            amount: 0,
            ..sample_fields()
        },
    )
    .unwrap_err();
    assert_eq!(err, ItemValidationError::ZeroAmount);
}

#[test]
fn validation_rejects_priority_outside_range() {
    for priority in [0, 6] {
        let err = Item::with_id(
            1,
            NewItem {
                priority,
                ..sample_fields()
            },
        )
        .unwrap_err();
        assert_eq!(err, ItemValidationError::PriorityOutOfRange { priority });
    }
}

#[test]
fn validation_rejects_negative_and_non_finite_cost() {
    let err = Item::with_id(
        1,
        NewItem {
            cost: -0.5,
            ..sample_fields()
        },
    )
    .unwrap_err();
    assert_eq!(err, ItemValidationError::NegativeCost { cost: -0.5 });

    let err = Item::with_id(
        1,
        NewItem {
            cost: f64::NAN,
            ..sample_fields()
        },
    )
    .unwrap_err();
    assert!(matches!(err, ItemValidationError::CostNotFinite { .. }));
}

#[test]
fn validation_error_messages_name_field_and_value() {
    let err = ItemValidationError::PriorityOutOfRange { priority: 9 };
    let message = err.to_string();
    assert!(message.contains("priority"));
    assert!(message.contains('9'));
}

#[test]
fn apply_patch_with_all_fields_unset_changes_nothing() {
    let item = Item::with_id(7, sample_fields()).unwrap();
    let patched = item.apply_patch(&ItemPatch::default()).unwrap();
    assert_eq!(patched, item);
}

#[test]
fn apply_patch_distinguishes_unset_buy_from_explicit_false() {
    let item = Item::with_id(7, sample_fields()).unwrap();
    assert!(item.buy);

    let kept = item
        .apply_patch(&ItemPatch {
            buy: None,
            ..ItemPatch::default()
        })
        .unwrap();
    assert!(kept.buy);

    let cleared = item
        .apply_patch(&ItemPatch {
            buy: Some(false),
            ..ItemPatch::default()
        })
        .unwrap();
    assert!(!cleared.buy);
}

#[test]
fn apply_patch_validates_the_whole_result() {
    let item = Item::with_id(7, sample_fields()).unwrap();

    let err = item
        .apply_patch(&ItemPatch {
            name: Some("bread".to_string()),
            amount: Some(0),
            ..ItemPatch::default()
        })
        .unwrap_err();

    assert_eq!(err, ItemValidationError::ZeroAmount);
    // The receiver is untouched; no partial field application happened.
    assert_eq!(item.name, "milk");
    assert_eq!(item.amount, 2);
}

#[test]
fn serialization_emits_canonical_unprefixed_keys() {
    let item = Item::with_id(42, sample_fields()).unwrap();
    let json = serde_json::to_value(&item).unwrap();

    let object = json.as_object().unwrap();
    for key in ["name", "store", "cost", "amount", "priority", "buy", "id"] {
        assert!(object.contains_key(key), "missing canonical key `{key}`");
    }
    assert!(object.keys().all(|key| !key.starts_with('_')));
    assert_eq!(json["name"], "milk");
    assert_eq!(json["buy"], true);
    assert_eq!(json["id"], 42);
}

#[test]
fn legacy_prefixed_keys_are_accepted_on_load() {
    let item: Item = serde_json::from_str(
        r#"{
            "_name": "eggs",
            "_store": "Kroger",
            "_cost": 4.53,
            "_amount": 1,
            "_priority": 2,
            "_buy": false,
            "_id": 99
        }"#,
    )
    .unwrap();

    assert_eq!(item.name, "eggs");
    assert_eq!(item.cost, 4.53);
    assert_eq!(item.priority, 2);
    assert!(!item.buy);
    assert_eq!(item.id, 99);
}

#[test]
fn legacy_string_buy_forms_are_normalized() {
    for (form, expected) in [
        ("\"True\"", true),
        ("\"YES\"", true),
        ("\"y\"", true),
        ("\"1\"", true),
        ("\"False\"", false),
        ("\"no\"", false),
        ("\"N\"", false),
        ("\"0\"", false),
    ] {
        let raw = format!(r#"{{"name": "milk", "buy": {form}}}"#);
        let item: Item = serde_json::from_str(&raw).unwrap();
        assert_eq!(item.buy, expected, "form {form}");
    }
}

#[test]
fn boolean_buy_values_pass_through_untouched() {
    let item: Item = serde_json::from_str(r#"{"name": "milk", "buy": false}"#).unwrap();
    assert!(!item.buy);
}

#[test]
fn unrecognized_buy_string_is_a_deserialization_error() {
    let err = serde_json::from_str::<Item>(r#"{"name": "milk", "buy": "maybe"}"#).unwrap_err();
    assert!(err.to_string().contains("invalid buy flag"));
}

#[test]
fn missing_fields_keep_defaults() {
    let item: Item = serde_json::from_str("{}").unwrap();
    assert_eq!(item, Item::default());
}

#[test]
fn unknown_keys_are_silently_ignored() {
    let item: Item =
        serde_json::from_str(r#"{"name": "milk", "aisle": 7, "_secret": true}"#).unwrap();
    assert_eq!(item.name, "milk");
}

#[test]
fn integer_typed_cost_is_stored_as_float() {
    let item: Item = serde_json::from_str(r#"{"name": "milk", "cost": 3}"#).unwrap();
    assert_eq!(item.cost, 3.0);
}

#[test]
fn line_total_multiplies_amount_and_cost() {
    let item = Item::with_id(
        1,
        NewItem {
            cost: 1.5,
            amount: 3,
            ..sample_fields()
        },
    )
    .unwrap();
    assert_eq!(item.line_total(), 4.5);
}
