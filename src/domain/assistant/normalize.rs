//! Result serializer - normalizes dispatcher output into JSON-safe values.
//!
//! Exact decimals (stock prices, monetary totals) cross into JSON as
//! floating-point numbers here; maps and sequences are normalized
//! recursively; every other scalar passes through unchanged. The pass is
//! idempotent: normalizing twice equals normalizing once.

use bigdecimal::{BigDecimal, ToPrimitive};
use serde_json::{Number, Value};

/// Converts an exact decimal to a JSON floating-point number.
///
/// Values outside f64 range degrade to null rather than panicking; record
/// store data never gets there in practice.
pub fn number(value: &BigDecimal) -> Value {
    value
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Recursively normalizes a value into JSON-safe primitives.
///
/// Floating-point numbers are rebuilt through `f64` so that any
/// higher-precision representation collapses to its float form; integers and
/// all other scalars pass through unchanged.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (key, normalize(inner)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                Value::Number(n)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn decimal_becomes_float() {
        let price = BigDecimal::from_str("19.95").unwrap();
        assert_eq!(number(&price), json!(19.95));
    }

    #[test]
    fn integral_decimal_becomes_float_number() {
        let total = BigDecimal::from(250);
        assert_eq!(number(&total), json!(250.0));
    }

    #[test]
    fn normalize_preserves_structure() {
        let value = json!({
            "total": 250.0,
            "breakdown": [
                {"name": "B", "quantity": 2, "value": 200.0},
                {"name": "A", "quantity": 5, "value": 50.0}
            ],
            "note": "ok",
            "missing": null
        });
        let normalized = normalize(value.clone());

        assert_eq!(normalized["total"], json!(250.0));
        assert_eq!(normalized["breakdown"][0]["name"], "B");
        assert_eq!(normalized["breakdown"][1]["quantity"], 5);
        assert_eq!(normalized["note"], "ok");
        assert!(normalized["missing"].is_null());
    }

    #[test]
    fn integers_pass_through_unchanged() {
        let value = json!({"count": 7, "big": 9_007_199_254_740_993i64});
        let normalized = normalize(value.clone());
        assert_eq!(normalized, value);
        assert!(normalized["big"].is_i64());
    }

    #[test]
    fn normalize_is_idempotent_on_known_shapes() {
        let value = json!([1, 2.5, {"x": [3.25, "s", true]}]);
        let once = normalize(value);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|i| json!(i)),
            (-1e12f64..1e12).prop_map(|f| json!(f)),
            "[a-z]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(value in arb_json()) {
            let once = normalize(value);
            let twice = normalize(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
