use depcheck_core::config::{DepcheckConfig, NonInteractivePolicy, CONFIG_FILE};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = DepcheckConfig::default();
    assert_eq!(config.catalog.to_str(), Some("catalog.toml"));
    assert_eq!(config.selection.to_str(), Some("selection.toml"));
    assert_eq!(config.prompt.non_interactive, NonInteractivePolicy::Decline);
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = DepcheckConfig::from_str("").unwrap();
    assert_eq!(config.catalog.to_str(), Some("catalog.toml"));
    assert_eq!(config.prompt.non_interactive, NonInteractivePolicy::Decline);
}

#[test]
fn test_parse_config() {
    let toml = r#"
catalog = "data/catalog.toml"
selection = "saves/last.toml"

[prompt]
non-interactive = "accept-first"
"#;
    let config = DepcheckConfig::from_str(toml).unwrap();
    assert_eq!(config.catalog.to_str(), Some("data/catalog.toml"));
    assert_eq!(config.selection.to_str(), Some("saves/last.toml"));
    assert_eq!(config.prompt.non_interactive, NonInteractivePolicy::AcceptFirst);
}

#[test]
fn test_load_without_file_resolves_against_dir() {
    let tmp = TempDir::new().unwrap();
    let config = DepcheckConfig::load(tmp.path()).unwrap();
    assert_eq!(config.catalog, tmp.path().join("catalog.toml"));
    assert_eq!(config.selection, tmp.path().join("selection.toml"));
}

#[test]
fn test_load_from_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(CONFIG_FILE),
        "catalog = \"game.toml\"\n[prompt]\nnon-interactive = \"accept-first\"\n",
    )
    .unwrap();
    let config = DepcheckConfig::load(tmp.path()).unwrap();
    assert_eq!(config.catalog, tmp.path().join("game.toml"));
    assert_eq!(config.prompt.non_interactive, NonInteractivePolicy::AcceptFirst);
}

#[test]
fn test_invalid_policy_rejected() {
    let err = DepcheckConfig::from_str("[prompt]\nnon-interactive = \"maybe\"").unwrap_err();
    assert!(err.to_string().contains("Failed to parse depcheck.toml"), "got: {err}");
}
