//! Tests for the built-in readers.

use std::io::Write;

use serde_json::{Value, json};
use tempfile::NamedTempFile;

use crate::error::ConfigError;

use super::{FormatReader, JsonReader, TomlReader, YamlReader};

fn parsed(reader: &dyn FormatReader, text: &str) -> Value {
    Value::Object(reader.parse(text).unwrap())
}

mod toml_reader {
    use super::*;

    #[test]
    fn nested_tables() {
        let text = r#"
login = "my_login"
ratio = 0.5

[database]
ports = [8000, 8001]
enabled = true
"#;
        assert_eq!(
            parsed(&TomlReader, text),
            json!({
                "login": "my_login",
                "ratio": 0.5,
                "database": {"ports": [8000, 8001], "enabled": true}
            })
        );
    }

    #[test]
    fn malformed_document() {
        let err = TomlReader.parse("login = ").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
        assert!(err.is_format_error());
    }
}

mod yaml_reader {
    use super::*;

    #[test]
    fn nested_mappings_and_null() {
        let text = "servers:\n  alpha:\n    ip: 10.0.0.1\n    dc: ~\n";
        assert_eq!(
            parsed(&YamlReader, text),
            json!({"servers": {"alpha": {"ip": "10.0.0.1", "dc": null}}})
        );
    }

    #[test]
    fn keys_keep_file_order() {
        let map = YamlReader.parse("b: 1\na: 2\nc: 3\n").unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn empty_document_is_empty_mapping() {
        assert!(YamlReader.parse("").unwrap().is_empty());
    }

    #[test]
    fn list_root_is_rejected() {
        let err = YamlReader.parse("- 1\n- 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { found: "a list" }));
    }
}

mod json_reader {
    use super::*;

    #[test]
    fn object_root() {
        assert_eq!(
            parsed(&JsonReader, r#"{"max_retries": 5, "ports": [1]}"#),
            json!({"max_retries": 5, "ports": [1]})
        );
    }

    #[test]
    fn scalar_root_is_rejected() {
        let err = JsonReader.parse("42").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration root must be a mapping, found a number"
        );
    }

    #[test]
    fn malformed_document() {
        let err = JsonReader.parse("{").unwrap_err();
        assert!(matches!(err, ConfigError::JsonParse(_)));
    }
}

mod reading_files {
    use super::*;

    #[test]
    fn reads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"login": "from_file"}}"#).unwrap();

        let map = JsonReader.read(file.path()).unwrap();

        assert_eq!(map["login"], json!("from_file"));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = TomlReader.read(&path).unwrap_err();

        match err {
            ConfigError::FileRead { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
