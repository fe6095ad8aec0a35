use std::fs;

use tempfile::tempdir;
use weave_core::catalog::{Catalog, EmptyCatalog, JsonCatalog};
use weave_core::model::BlockKind;

const CATALOG_JSON: &str = r#"{
    "version": "2024.1",
    "actions": {
        "set_var/+": {
            "tags": [{
                "name": "Result Variable Mode",
                "options": ["Default Value", "Create List"],
                "default": "Default Value",
                "slot": 26
            }],
            "arg_types": ["VARIABLE", "NUMBER"]
        },
        "player_action/SendMessage": {
            "arg_types": ["COMPONENT"],
            "deprecated": true
        },
        "func/dynamic": {
            "tags": [{
                "name": "Is Hidden",
                "options": ["True", "False"],
                "default": "False"
            }]
        }
    }
}"#;

#[test]
fn catalog_loads_from_a_data_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("actions.json");
    fs::write(&path, CATALOG_JSON).expect("write catalog fixture");

    let catalog = JsonCatalog::from_path(&path).expect("catalog should parse");
    assert_eq!(catalog.version, "2024.1");
    assert_eq!(catalog.len(), 3);

    let spec = catalog.lookup(BlockKind::SetVariable, "+").expect("+ should be present");
    assert_eq!(spec.tags.len(), 1);
    assert_eq!(spec.tags[0].default, "Default Value");
    assert_eq!(spec.tags[0].slot, 26);
    assert!(!spec.deprecated);
}

#[test]
fn optional_fields_take_defaults() {
    let catalog = JsonCatalog::from_str(CATALOG_JSON).unwrap();

    let send = catalog.lookup(BlockKind::PlayerAction, "SendMessage").unwrap();
    assert!(send.tags.is_empty());
    assert!(send.deprecated);

    // tag slot falls back to the conventional last container slot
    let func = catalog.lookup(BlockKind::FunctionDef, "dynamic").unwrap();
    assert_eq!(func.tags[0].slot, 26);
}

#[test]
fn lookups_miss_for_unknown_actions() {
    let catalog = JsonCatalog::from_str(CATALOG_JSON).unwrap();
    assert!(catalog.lookup(BlockKind::SetVariable, "*").is_none());
    assert!(catalog.lookup(BlockKind::GameAction, "+").is_none());
}

#[test]
fn empty_catalog_always_misses() {
    assert!(EmptyCatalog.lookup(BlockKind::SetVariable, "+").is_none());
}

#[test]
fn missing_files_and_bad_json_are_reported() {
    assert!(JsonCatalog::from_path("/definitely/not/here.json").is_err());
    assert!(JsonCatalog::from_str("{not json").is_err());
}
