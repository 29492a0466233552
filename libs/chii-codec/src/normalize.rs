use std::collections::HashMap;

use chii_api::{Key, Value};

/// Canonicalize every array key to text, recursively.
///
/// Integer keys become their decimal form. Entry order is preserved; when two
/// entries end up with the same key the later value replaces the earlier one
/// at the earlier entry's position, like an associative-array assignment.
/// Non-array values pass through unchanged.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Array(entries) => Value::Array(normalize_entries(entries)),
        other => other,
    }
}

fn normalize_entries(entries: Vec<(Key, Value)>) -> Vec<(Key, Value)> {
    let mut out: Vec<(Key, Value)> = Vec::with_capacity(entries.len());
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(entries.len());

    for (key, value) in entries {
        let key = key.into_text();
        let value = normalize(value);
        match slots.get(&key) {
            Some(&slot) => out[slot].1 = value,
            None => {
                slots.insert(key.clone(), out.len());
                out.push((Key::Text(key), value));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn mixed_keys_become_text_in_order() {
        let raw = Value::Array(vec![
            (Key::Int(0), text("x")),
            (Key::from("k"), text("y")),
            (Key::Int(1), text("z")),
        ]);
        assert_eq!(
            normalize(raw),
            Value::Array(vec![
                (Key::from("0"), text("x")),
                (Key::from("k"), text("y")),
                (Key::from("1"), text("z")),
            ])
        );
    }

    #[test]
    fn collision_keeps_first_position_and_last_value() {
        let raw = Value::Array(vec![
            (Key::from("1"), text("first")),
            (Key::from("k"), text("k")),
            (Key::Int(1), text("second")),
            (Key::from("k"), text("k2")),
        ]);
        assert_eq!(
            normalize(raw),
            Value::Array(vec![(Key::from("1"), text("second")), (Key::from("k"), text("k2"))])
        );
    }

    #[test]
    fn negative_integer_keys() {
        let raw = Value::Array(vec![(Key::Int(-3), Value::Null)]);
        assert_eq!(normalize(raw), Value::Array(vec![(Key::from("-3"), Value::Null)]));
    }

    #[test]
    fn nested_arrays_are_normalized() {
        let raw = Value::Array(vec![(
            Key::Int(0),
            Value::Array(vec![(Key::Int(5), Value::Int(1))]),
        )]);
        let v = normalize(raw);
        let inner = v.get("0").unwrap().as_array().unwrap();
        assert!(inner.iter().all(|(k, _)| k.is_text()));
        assert_eq!(inner[0].0, Key::from("5"));
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(normalize(Value::Int(4)), Value::Int(4));
        assert_eq!(normalize(Value::Null), Value::Null);
    }

    fn arb_key() -> impl Strategy<Value = Key> {
        prop_oneof![(-5i64..20).prop_map(Key::Int), "[a-c0-9]{0,2}".prop_map(Key::Text)]
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::Int),
            "[a-z日]{0,4}".prop_map(Value::Text),
        ];
        leaf.prop_recursive(4, 64, 6, |inner| {
            prop::collection::vec((arb_key(), inner), 0..6).prop_map(Value::Array)
        })
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(v in arb_value()) {
            let once = normalize(v);
            prop_assert_eq!(normalize(once.clone()), once);
        }

        #[test]
        fn normalized_keys_are_unique_text(v in arb_value()) {
            if let Value::Array(entries) = normalize(v) {
                let mut seen = std::collections::HashSet::new();
                for (k, _) in &entries {
                    prop_assert!(k.is_text());
                    prop_assert!(seen.insert(k.as_text().into_owned()));
                }
            }
        }
    }
}
