//! Loading install configuration from disk

use modmerge_meta::{DocumentFormat, Error, RuleConfig, Strategy, discover_config, load_config};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_json_config() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("install_config.json");
    fs::write(
        &path,
        r#"{
            "json": { "*": { "append_keys": ["spawns"], "match_by": { "spawns": ["name"] } } },
            "xml": { "cfgweather.xml": { "strategy": "settings" } }
        }"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();

    let json_rule = config.resolve("cfggameplay.json");
    assert!(json_rule.appends("spawns"));
    assert_eq!(json_rule.match_fields("spawns").unwrap(), ["name"]);
    assert_eq!(config.resolve("cfgweather.xml").strategy, Strategy::Settings);
    assert!(config.rule_set(DocumentFormat::Opaque).is_empty());
}

#[test]
fn test_load_toml_config() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("install_config.toml");
    fs::write(
        &path,
        r#"
[xml."db/*.xml"]
strategy = "collection"
id_attributes = ["name"]
property_tags = ["nominal"]

[other."*.bin"]
strategy = "overwrite"
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();

    let rule = config.resolve("db/types.xml");
    assert_eq!(rule.id_attributes, vec!["name"]);
    assert!(rule.is_property_tag("nominal"));
    assert!(config.resolve("mapgrouppos.bin").is_overwrite());
}

#[test]
fn test_invalid_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("install_config.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert!(err.to_string().contains("install_config.json"));
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("install_config.yaml");
    fs::write(&path, "json: {}").unwrap();

    assert!(matches!(
        load_config(&path),
        Err(Error::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_discover_falls_back_to_builtin() {
    let temp = TempDir::new().unwrap();

    let (origin, config) = discover_config(temp.path()).unwrap();

    assert!(origin.is_none());
    assert_eq!(config, RuleConfig::builtin());
}

#[test]
fn test_discovered_file_replaces_builtin() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("install_config.json"), r#"{"xml": {}}"#).unwrap();

    let (origin, config) = discover_config(temp.path()).unwrap();

    assert!(origin.is_some());
    // No overlay: the builtin append keys are gone.
    assert!(!config.resolve("cfggameplay.json").appends("objectSpawnersArr"));
}

#[test]
fn test_json_config_wins_over_toml() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("install_config.json"),
        r#"{"json": {"*": {"strategy": "overwrite"}}}"#,
    )
    .unwrap();
    fs::write(temp.path().join("install_config.toml"), "").unwrap();

    let (origin, config) = discover_config(temp.path()).unwrap();

    assert!(origin.unwrap().ends_with("install_config.json"));
    assert!(config.resolve("a.json").is_overwrite());
}

#[test]
fn test_unknown_top_level_keys_are_rejected() {
    let temp = TempDir::new().unwrap();
    for content in [
        r#"{"*.json": {"append_keys": ["objectSpawnersArr"]}, "*.xml": {"strategy": "settings"}}"#,
        r#"{"jsn": {"*": {"append_keys": ["objectSpawnersArr"]}}}"#,
    ] {
        let path = temp.path().join("install_config.json");
        fs::write(&path, content).unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfig { .. }),
            "expected invalid config for {content}, got {err:?}"
        );
    }
}

#[test]
fn test_unknown_rule_fields_are_ignored() {
    let config = RuleConfig::from_str_as(
        r#"{"json": {"*": {"append_keys": ["spawns"], "comment": "kept for humans"}}}"#,
        "json",
        std::path::Path::new("install_config.json"),
    )
    .unwrap();
    assert!(config.resolve("cfggameplay.json").appends("spawns"));
}
