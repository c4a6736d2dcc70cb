//! Tests for command-line matching.

use serde_json::{Value, json};

use crate::error::ConfigError;

use super::Schema;

fn schema(value: Value) -> Schema {
    let Value::Object(map) = value else {
        panic!("expected an object");
    };
    Schema::compile(&map).unwrap()
}

/// Parses `args` (program name prepended) into an object of overrides.
fn overrides(schema: &Schema, args: &[&str]) -> Result<Value, ConfigError> {
    let mut full_args = vec!["confargs"];
    full_args.extend(args);
    schema
        .overrides_from(full_args)
        .map(|pairs| Value::Object(pairs.into_iter().collect()))
}

fn flat() -> Schema {
    schema(json!({
        "login": "my_login",
        "max_retries": 5,
        "ports": [8000, 8001, 8002],
        "ratio": 0.5,
        "nice_bool_false": true,
        "nice_bool_true": false
    }))
}

mod defaults {
    use super::*;

    #[test]
    fn no_args_yields_config_values() {
        let result = overrides(&flat(), &[]).unwrap();

        assert_eq!(
            result,
            json!({
                "login": "my_login",
                "max_retries": 5,
                "ports": [8000, 8001, 8002],
                "ratio": 0.5,
                "nice_bool_false": true,
                "nice_bool_true": false
            })
        );
    }

    #[test]
    fn empty_token_list_is_accepted() {
        let result = flat().overrides_from(Vec::<String>::new()).unwrap();
        assert_eq!(result.len(), 6);
    }
}

mod overriding {
    use super::*;

    #[test]
    fn flags_override_config_values() {
        let result = overrides(
            &flat(),
            &[
                "--login",
                "login_from_cmd",
                "--max_retries",
                "3",
                "--nice_bool_false",
                "False",
                "--nice_bool_true",
                "true",
            ],
        )
        .unwrap();

        assert_eq!(result["login"], json!("login_from_cmd"));
        assert_eq!(result["max_retries"], json!(3));
        assert_eq!(result["nice_bool_false"], json!(false));
        assert_eq!(result["nice_bool_true"], json!(true));
        assert_eq!(result["ports"], json!([8000, 8001, 8002]));
        assert_eq!(result["ratio"], json!(0.5));
    }

    #[test]
    fn inline_values() {
        let result = overrides(&flat(), &["--ratio=0.2", "--login="]).unwrap();

        assert_eq!(result["ratio"], json!(0.2));
        assert_eq!(result["login"], json!(""));
    }

    #[test]
    fn negative_numbers_are_values() {
        let result = overrides(&flat(), &["--max_retries", "-1"]).unwrap();
        assert_eq!(result["max_retries"], json!(-1));
    }

    #[test]
    fn last_repeated_flag_wins() {
        let result = overrides(&flat(), &["--max_retries", "1", "--max_retries", "2"]).unwrap();
        assert_eq!(result["max_retries"], json!(2));
    }

    #[test]
    fn list_leaf_reads_comma_separated_literal() {
        let result = overrides(&flat(), &["--ports", "1,2"]).unwrap();
        assert_eq!(result["ports"], json!([1, 2]));
    }

    #[test]
    fn dotted_flags() {
        let schema = schema(json!({"database": {"connection_max": 5000}}));
        let result = overrides(&schema, &["--database.connection_max", "10"]).unwrap();

        assert_eq!(result, json!({"database.connection_max": 10}));
    }
}

mod tolerance {
    use super::*;

    #[test]
    fn unknown_flags_and_positionals_are_ignored() {
        let result = overrides(
            &flat(),
            &[
                "positional",
                "--login",
                "login_from_cmd",
                "--redundant-arg",
                "123",
                "--help",
                "-v",
                "--other=1",
            ],
        )
        .unwrap();

        assert_eq!(result["login"], json!("login_from_cmd"));
        assert_eq!(result["max_retries"], json!(5));
    }

    #[test]
    fn config_keys_named_like_builtin_flags() {
        let schema = schema(json!({"help": "text", "version": 1}));
        let result = overrides(&schema, &["--help", "x", "--version", "2"]).unwrap();

        assert_eq!(result, json!({"help": "x", "version": 2}));
    }
}

mod required {
    use super::*;

    fn cmd_only() -> Schema {
        schema(json!({
            "login": "?:str",
            "max_retries": "?:int",
            "ratio": "?:float",
            "ports": "?:list[int]",
            "fractions": "?:list[float]"
        }))
    }

    #[test]
    fn required_and_list_flags_are_read() {
        let result = overrides(
            &cmd_only(),
            &[
                "--login",
                "login_from_cmd",
                "--max_retries",
                "3",
                "--ratio",
                "0.2",
                "--ports",
                "5000,5001",
                "--fractions",
                "0.1, 0.2",
            ],
        )
        .unwrap();

        assert_eq!(
            result,
            json!({
                "login": "login_from_cmd",
                "max_retries": 3,
                "ratio": 0.2,
                "ports": [5000, 5001],
                "fractions": [0.1, 0.2]
            })
        );
    }

    #[test]
    fn omitted_list_markers_are_absent() {
        let result = overrides(
            &cmd_only(),
            &["--login", "a", "--max_retries", "1", "--ratio", "1"],
        )
        .unwrap();

        assert!(result.get("ports").is_none());
        assert!(result.get("fractions").is_none());
    }

    #[test]
    fn missing_required_flags_are_named() {
        let err = overrides(&cmd_only(), &["--login", "a"]).unwrap_err();

        match err {
            ConfigError::MissingArguments { flags } => {
                assert_eq!(flags, vec!["--max_retries", "--ratio"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = overrides(&cmd_only(), &["--login", "a", "--max_retries", "many", "--ratio", "1"])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument(_)));
    }

    #[test]
    fn flag_without_value_is_rejected() {
        let err = overrides(&cmd_only(), &["--ratio", "1", "--max_retries", "1", "--login"])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument(_)));
    }
}
