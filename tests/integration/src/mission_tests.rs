//! Mission-based Integration Tests
//!
//! These tests install the fixture mod package from `test-fixtures/missions`
//! over a copy of the fixture server mission and check the result across
//! every crate: configuration loading, rule resolution, both mergers, and
//! the install engine.

use std::fs;
use std::path::{Path, PathBuf};

use modmerge_core::{FileOutcome, InstallOptions, InstallReport, Installer};
use modmerge_meta::{RuleConfig, Strategy, discover_config};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;
use walkdir::WalkDir;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/missions")
}

/// Recursively copy a fixture tree.
fn copy_tree(from: &Path, to: &Path) {
    for entry in WalkDir::new(from) {
        let entry = entry.unwrap();
        let dest = to.join(entry.path().strip_prefix(from).unwrap());
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).unwrap();
        } else {
            fs::copy(entry.path(), &dest).unwrap();
        }
    }
}

/// A throwaway copy of the fixture mod package and server mission
struct TestMission {
    temp_dir: TempDir,
}

impl TestMission {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        copy_tree(&fixtures().join("mod-package"), &temp_dir.path().join("mod"));
        copy_tree(&fixtures().join("server"), &temp_dir.path().join("server"));
        Self { temp_dir }
    }

    fn package(&self) -> PathBuf {
        self.temp_dir.path().join("mod")
    }

    fn source(&self) -> PathBuf {
        self.package().join("dayzOffline.chernarusplus")
    }

    fn server(&self) -> PathBuf {
        self.temp_dir.path().join("server")
    }

    fn config(&self) -> RuleConfig {
        let (found, config) = discover_config(&self.package()).unwrap();
        assert!(found.is_some(), "fixture package ships a configuration");
        config
    }

    fn install(&self, options: InstallOptions) -> InstallReport {
        Installer::new(self.config(), options)
            .install(&self.source(), &self.server())
            .unwrap()
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.server().join(rel)).unwrap()
    }

    fn json(&self, rel: &str) -> Value {
        serde_json::from_str(&self.read(rel)).unwrap()
    }

    fn backups(&self) -> Vec<String> {
        let mut names: Vec<String> = WalkDir::new(self.server())
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(".bak"))
            .collect();
        names.sort();
        names
    }
}

// =============================================================================
// Full install
// =============================================================================

#[test]
fn test_fixture_install_outcomes() {
    let mission = TestMission::new();
    let report = mission.install(InstallOptions::default());

    let outcomes: Vec<(&str, &str)> = report
        .entries
        .iter()
        .map(|e| (e.path.as_str(), e.outcome.label()))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("README.txt", "UPDATED"),
            ("cfggameplay.json", "MERGED"),
            ("cfgweather.xml", "MERGED"),
            ("custom/traders.json", "NEW"),
            ("db/types.xml", "MERGED"),
            ("mapgroupproto.bin", "OVERWRITTEN"),
        ]
    );
    assert!(!report.has_failures());
    assert_eq!(
        report.entry("cfgweather.xml").unwrap().strategy,
        Strategy::Settings
    );
}

#[test]
fn test_fixture_gameplay_config_keeps_server_settings() {
    let mission = TestMission::new();
    mission.install(InstallOptions::default());

    assert_eq!(
        mission.json("cfggameplay.json"),
        json!({
            "version": 123,
            "GeneralData": {
                "disableBaseDamage": false,
                "disablePersonalLight": true
            },
            "WorldsData": {
                "lightingConfig": 1,
                "objectSpawnersArr": ["./custom/base.json", "./custom/traders.json"]
            },
            "SpawnData": {
                "spawnPoints": [
                    {"name": "Berezino", "pos": [12000, 9000], "radius": 50},
                    {"name": "Airfield", "pos": [4500, 10200]}
                ]
            }
        })
    );
}

#[test]
fn test_fixture_types_merge_by_name() {
    let mission = TestMission::new();
    mission.install(InstallOptions::default());

    let types = mission.read("db/types.xml");
    assert_eq!(types.matches("<type name=\"AK74\">").count(), 1);
    assert!(types.contains("<nominal>20</nominal>"));
    assert!(types.contains("<lifetime>7200</lifetime>"));
    assert!(types.contains("<flags count_in_cargo=\"0\" count_in_hoarder=\"0\"/>"));
    assert!(types.contains("<type name=\"Apple\">"));
    assert!(types.contains("<type name=\"TraderCoin\">"));
    assert!(!types.contains("low-pop"), "comments are not carried over");
    assert!(
        types.find("Apple").unwrap() < types.find("TraderCoin").unwrap(),
        "new types append after existing ones"
    );
}

#[test]
fn test_fixture_weather_settings_are_singletons() {
    let mission = TestMission::new();
    mission.install(InstallOptions::default());

    let weather = mission.read("cfgweather.xml");
    assert!(weather.contains("<weather reset=\"0\" enable=\"1\">"));
    assert!(weather.contains("<current actual=\"0.6\" time=\"120\" duration=\"240\"/>"));
    assert!(weather.contains("<limits min=\"0.0\" max=\"1.0\"/>"));
    assert!(weather.contains("<fog>"));
    assert!(weather.contains("<thresholds min=\"0.7\" max=\"1.0\" end=\"120\"/>"));
    assert_eq!(weather.matches("<overcast>").count(), 1);
}

#[test]
fn test_fixture_replaced_files_are_backed_up() {
    let mission = TestMission::new();
    mission.install(InstallOptions::default());

    assert_eq!(mission.read("mapgroupproto.bin"), "MODMAP-v2");
    assert_eq!(mission.read("README.txt"), "notes from the mod author\n");

    let backups = mission.backups();
    let originals: Vec<&str> = backups
        .iter()
        .map(|n| n.split(".2").next().unwrap_or(n))
        .collect();
    assert_eq!(
        originals,
        vec![
            "README.txt",
            "cfggameplay.json",
            "cfgweather.xml",
            "mapgroupproto.bin",
            "types.xml"
        ]
    );
}

#[test]
fn test_fixture_install_is_idempotent_for_merged_documents() {
    let mission = TestMission::new();
    let options = InstallOptions {
        backups: false,
        ..InstallOptions::default()
    };
    mission.install(options.clone());
    let first: Vec<String> = ["cfggameplay.json", "cfgweather.xml", "db/types.xml"]
        .iter()
        .map(|rel| mission.read(rel))
        .collect();

    let report = mission.install(options);

    let second: Vec<String> = ["cfggameplay.json", "cfgweather.xml", "db/types.xml"]
        .iter()
        .map(|rel| mission.read(rel))
        .collect();
    assert_eq!(first, second);
    assert_eq!(
        report.entry("custom/traders.json").unwrap().outcome,
        FileOutcome::Merged
    );
    assert!(mission.backups().is_empty());
}

#[test]
fn test_fixture_dry_run_matches_real_run() {
    let mission = TestMission::new();
    let preview = mission.install(InstallOptions {
        dry_run: true,
        ..InstallOptions::default()
    });
    assert!(mission.backups().is_empty());
    assert!(!mission.server().join("custom/traders.json").exists());

    let real = mission.install(InstallOptions::default());

    let checksums = |report: &InstallReport| -> Vec<(String, Option<String>)> {
        report
            .entries
            .iter()
            .map(|e| (e.path.clone(), e.checksum.clone()))
            .collect()
    };
    assert_eq!(checksums(&preview), checksums(&real));
}

#[test]
fn test_package_without_config_uses_builtin_rules() {
    let mission = TestMission::new();
    fs::remove_file(mission.package().join("install_config.json")).unwrap();

    let (found, config) = discover_config(&mission.package()).unwrap();
    assert!(found.is_none());
    assert_eq!(config, RuleConfig::builtin());

    let report = Installer::new(config, InstallOptions::default())
        .install(&mission.source(), &mission.server())
        .unwrap();

    // No overwrite rule for .bin files: the opaque file is just updated.
    assert_eq!(
        report.entry("mapgroupproto.bin").unwrap().outcome,
        FileOutcome::Updated
    );
    // spawnPoints is not an append key under the built-in rules.
    assert_eq!(
        mission.json("cfggameplay.json")["SpawnData"]["spawnPoints"],
        json!([
            {"name": "Berezino", "pos": [12000, 9000]},
            {"name": "Airfield", "pos": [4500, 10200]}
        ])
    );
}
