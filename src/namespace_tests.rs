//! Tests for the dot-addressable namespace.

use serde_json::{Value, json};

use super::namespace::{Entry, Namespace, NamespaceError};

fn nested() -> Namespace {
    Namespace::try_from(json!({
        "item1": 1,
        "item2": 2,
        "item3": {
            "subitem31": {"subitem311": 311, "subitem312": 312},
            "subitem32": {"subitem321": 321, "subitem322": 322}
        }
    }))
    .unwrap()
}

mod access {
    use super::*;

    #[test]
    fn set_then_get_simple() {
        let mut ns = Namespace::new();
        ns.set("item", json!(1)).unwrap();

        assert_eq!(ns["item"], json!(1));
        assert_eq!(ns.get("item").and_then(Entry::as_i64), Some(1));
    }

    #[test]
    fn mappings_are_promoted_on_construction() {
        let ns = nested();

        assert!(ns["item3"].is_namespace());
        assert!(ns["item3"]["subitem31"].is_namespace());
        assert_eq!(ns["item3"]["subitem31"]["subitem311"], json!(311));
        assert_eq!(ns["item3"]["subitem32"]["subitem322"], json!(322));
    }

    #[test]
    fn plain_dotted_and_nested_access_agree() {
        let ns = nested();

        for (path, expected) in [
            ("item3.subitem31.subitem311", 311),
            ("item3.subitem31.subitem312", 312),
            ("item3.subitem32.subitem321", 321),
            ("item3.subitem32.subitem322", 322),
        ] {
            let segments: Vec<&str> = path.split('.').collect();
            let walked = &ns[segments[0]][segments[1]][segments[2]];

            assert_eq!(ns[path], json!(expected));
            assert_eq!(walked, &ns[path]);
            assert_eq!(ns["item3"][&path["item3.".len()..]], json!(expected));
        }
    }

    #[test]
    fn absent_keys_read_as_none_and_null() {
        let ns = nested();

        assert!(ns.get("missing").is_none());
        assert!(ns.get("missing.deeper").is_none());
        assert!(ns.get("item1.deeper").is_none());
        assert!(ns["missing"].is_null());
        assert!(ns["item1"]["deeper"].is_null());
    }

    #[test]
    fn indexing_through_a_plain_value_is_null_but_try_get_errs() {
        let ns = nested();

        assert!(ns["item1.deeper"].is_null());
        assert!(ns.try_get("item1.deeper").is_err());
    }

    #[test]
    fn try_get_reports_bad_routing() {
        let ns = nested();

        assert_eq!(ns.try_get("item3.nope"), Ok(None));
        assert_eq!(
            ns.try_get("item1.deeper"),
            Err(NamespaceError::NotANamespace {
                key: "item1.deeper".to_string(),
                segment: "item1".to_string(),
            })
        );
        assert_eq!(
            ns.try_get("item3.gone.leaf"),
            Err(NamespaceError::Missing {
                key: "item3.gone.leaf".to_string(),
                segment: "item3.gone".to_string(),
            })
        );
    }

    #[test]
    fn typed_accessors() {
        let ns = Namespace::try_from(json!({"s": "x", "f": 0.5, "b": true})).unwrap();

        assert_eq!(ns["s"].as_str(), Some("x"));
        assert_eq!(ns["f"].as_f64(), Some(0.5));
        assert_eq!(ns["b"].as_bool(), Some(true));
        assert_eq!(ns.value("s"), Some(&json!("x")));
        assert!(ns.get_namespace("s").is_none());
    }
}

mod mutation {
    use super::*;

    #[test]
    fn dotted_set_materializes_namespaces() {
        let mut ns = Namespace::new();
        ns.set("item1.subitem1", json!(11)).unwrap();

        assert!(ns["item1"].is_namespace());
        assert_eq!(ns["item1"]["subitem1"], json!(11));
        assert_eq!(ns["item1.subitem1"], json!(11));
    }

    #[test]
    fn dotted_set_extends_existing_namespace() {
        let mut ns = Namespace::new();
        ns.set("item1.subitem1", json!(11)).unwrap();
        ns.set("item1.subitem2", json!(12)).unwrap();

        assert_eq!(ns["item1"], json!({"subitem1": 11, "subitem2": 12}));
    }

    #[test]
    fn dotted_set_through_value_fails_without_change() {
        let mut ns = Namespace::new();
        ns.set("item2", json!(22)).unwrap();

        let err = ns.set("item2.subitem2", json!(1)).unwrap_err();

        assert_eq!(
            err,
            NamespaceError::NotANamespace {
                key: "item2.subitem2".to_string(),
                segment: "item2".to_string(),
            }
        );
        assert_eq!(ns["item2"], json!(22));
    }

    #[test]
    fn nested_routing_error_reports_full_path() {
        let mut ns = Namespace::new();
        ns.set("a.b", json!(1)).unwrap();

        let err = ns.set("a.b.c", json!(2)).unwrap_err();

        assert_eq!(err.to_string(), "Cannot route 'a.b.c' through 'a.b': it holds a value, not a namespace");
    }

    #[test]
    fn assigning_a_mapping_promotes_it() {
        let mut ns = Namespace::new();
        ns.set("item2", json!({"subitem2": 22})).unwrap();

        assert_eq!(ns["item2"]["subitem2"], json!(22));
        assert_eq!(ns["item2.subitem2"], json!(22));
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut ns = Namespace::new();
        ns.set("a", json!(1)).unwrap();
        ns.set("b", json!(2)).unwrap();
        ns.set("a", json!(3)).unwrap();

        assert_eq!(ns.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(ns["a"], json!(3));
    }

    #[test]
    fn remove_plain_and_dotted() {
        let mut ns = nested();

        assert_eq!(ns.remove("item1"), Some(Entry::Value(json!(1))));
        assert!(!ns.contains_key("item1"));

        assert!(ns.remove("item3.subitem31.subitem311").is_some());
        assert!(ns.get("item3.subitem31.subitem311").is_none());
        assert_eq!(ns["item3"]["subitem31"], json!({"subitem312": 312}));

        assert!(ns.remove("item2.nope").is_none());
    }

    #[test]
    fn from_map_routes_dotted_keys() {
        let flat = Namespace::try_from(json!({"a.b": 1, "a.c": 2})).unwrap();
        let nested = Namespace::try_from(json!({"a": {"b": 1, "c": 2}})).unwrap();

        assert_eq!(flat, nested);
    }
}

mod equality {
    use super::*;

    #[test]
    fn equals_plain_mapping() {
        let ns = Namespace::try_from(json!({"a": 1})).unwrap();

        assert_eq!(ns, json!({"a": 1}));
        assert_eq!(json!({"a": 1}), ns);
        assert_ne!(ns, json!({"a": 2}));
        assert_ne!(ns, json!({"a": 1, "b": 2}));
        assert_ne!(ns, json!([1]));
    }

    #[test]
    fn key_order_is_irrelevant() {
        let first = Namespace::try_from(json!({"a": 1, "b": {"c": 2}})).unwrap();
        let second = Namespace::try_from(json!({"b": {"c": 2}, "a": 1})).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn nested_entry_equals_mapping() {
        let ns = nested();

        assert_eq!(
            ns["item3"]["subitem31"],
            json!({"subitem311": 311, "subitem312": 312})
        );
        assert_ne!(ns["item3"], json!(1));
    }

    #[test]
    fn round_trips_to_value() {
        let value = json!({"a": {"b": [1, 2]}, "c": null});
        let ns = Namespace::try_from(value.clone()).unwrap();

        assert_eq!(ns.to_value(), value);
        assert_eq!(Value::from(ns), value);
    }

    #[test]
    fn serializes_in_insertion_order() {
        let mut ns = Namespace::new();
        ns.set("z", json!(1)).unwrap();
        ns.set("a.b", json!(true)).unwrap();

        assert_eq!(serde_json::to_string(&ns).unwrap(), r#"{"z":1,"a":{"b":true}}"#);
    }
}
