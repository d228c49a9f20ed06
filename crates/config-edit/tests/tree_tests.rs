//! Tests for tree create/read/update/delete and placeholder substitution

use config_edit::{Error, create, delete, delete_all, read, replace_all, update};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn sample() -> Value {
    json!({
        "build": { "preset": "vue", "polyfills": true },
        "edgeApplications": [
            {
                "name": "Old App",
                "rules": { "request": [{ "name": "first" }, { "name": "second" }] }
            }
        ]
    })
}

#[test]
fn test_create_on_nothing() {
    let config = create("build.preset", json!("typescript")).unwrap();
    assert_eq!(config, json!({ "build": { "preset": "typescript" } }));
}

#[test]
fn test_create_with_index_pads_sequence() {
    let config = create("functions[1].name", json!("api")).unwrap();
    assert_eq!(config, json!({ "functions": [null, { "name": "api" }] }));
}

#[test]
fn test_create_decodes_json_text() {
    let config = create("build", json!(r#"{"preset": "next"}"#)).unwrap();
    assert_eq!(read("build.preset", &config).unwrap(), &json!("next"));
}

#[test]
fn test_update_keeps_siblings() {
    let config = sample();
    let updated = update("edgeApplications[0].name", json!("New App"), &config).unwrap();

    assert_eq!(
        read("edgeApplications[0].name", &updated).unwrap(),
        &json!("New App")
    );
    assert_eq!(
        read("edgeApplications[0].rules", &updated).unwrap(),
        read("edgeApplications[0].rules", &config).unwrap()
    );
    assert_eq!(read("build", &updated).unwrap(), read("build", &config).unwrap());
    // Input is untouched
    assert_eq!(config, sample());
}

#[test]
fn test_update_creates_missing_structure() {
    let updated = update("cache[0].name", json!("assets"), &sample()).unwrap();
    assert_eq!(updated["cache"], json!([{ "name": "assets" }]));
}

#[test]
fn test_update_requires_config_and_value() {
    assert!(matches!(
        update("build.preset", json!("x"), &Value::Null),
        Err(Error::MissingValue)
    ));
    assert!(matches!(
        update("build.preset", Value::Null, &sample()),
        Err(Error::MissingValue)
    ));
}

#[test]
fn test_update_index_on_mapping() {
    assert!(matches!(
        update("build[0]", json!("x"), &sample()),
        Err(Error::NotAnArray { .. })
    ));
}

#[test]
fn test_read_index_out_of_range() {
    let err = read("edgeApplications[0].rules.request[2]", &sample()).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange { index: 2, len: 2 }));
    insta::assert_snapshot!(err.to_string(), @"Array index 2 does not exist (length 2)");
}

#[test]
fn test_read_missing_property() {
    let err = read("build.missing", &sample()).unwrap_err();
    assert!(matches!(err, Error::MissingProperty { ref property } if property == "missing"));
}

#[test]
fn test_read_malformed_path() {
    assert!(matches!(
        read("build..preset", &sample()),
        Err(Error::MalformedPath { .. })
    ));
}

#[test]
fn test_delete_only_element() {
    let updated = delete("edgeApplications[0]", &sample()).unwrap();
    assert_eq!(updated["edgeApplications"], json!([]));
}

#[test]
fn test_delete_property_keeps_order() {
    let config = json!({ "a": 1, "b": 2, "c": 3 });
    let updated = delete("b", &config).unwrap();
    let keys: Vec<&String> = updated.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["a", "c"]);
}

#[test]
fn test_delete_is_strict() {
    assert!(matches!(
        delete("build.missing", &sample()),
        Err(Error::MissingProperty { .. })
    ));
    assert!(matches!(
        delete("edgeApplications[3]", &sample()),
        Err(Error::IndexOutOfRange { index: 3, len: 1 })
    ));
}

#[test]
fn test_delete_all() {
    assert_eq!(delete_all(), json!({}));
}

#[test]
fn test_replace_all_whole_values_only() {
    let config = json!({
        "name": "$APP",
        "domains": ["$APP", "www.$APP.com"],
        "port": 80
    });
    let replaced = replace_all("$APP", "shop", &config);
    assert_eq!(
        replaced,
        json!({
            "name": "shop",
            "domains": ["shop", "www.$APP.com"],
            "port": 80
        })
    );
}
