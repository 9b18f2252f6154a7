use super::*;

#[test]
fn default_config_matches_builtin_constants() {
    let cfg = ThemeConfig::default();
    assert_eq!(cfg.storage_key, DEFAULT_STORAGE_KEY);
    assert_eq!(cfg.attribute_name, DEFAULT_ATTRIBUTE_NAME);
    assert_eq!(cfg.default_theme, "light");
    assert_eq!(cfg.toggle_cycle, ToggleCycle::default());
    assert_eq!(cfg.toggle_mode, ToggleMode::Cycle);
}

#[test]
fn from_json_empty_object_yields_defaults() {
    let cfg = ThemeConfig::from_json("{}").unwrap();
    assert_eq!(cfg, ThemeConfig::default());
}

#[test]
fn from_json_parses_overrides() {
    let cfg = ThemeConfig::from_json(
        r#"{
            "storage_key": "site-theme",
            "default_theme": "dark",
            "toggle_cycle": ["light", "dark", "sepia"],
            "attribute_name": "data-mode",
            "toggle_mode": "binary"
        }"#,
    )
    .unwrap();

    assert_eq!(cfg.storage_key, "site-theme");
    assert_eq!(cfg.default_theme, "dark");
    assert_eq!(cfg.toggle_cycle.themes().len(), 3);
    assert_eq!(cfg.attribute_name, "data-mode");
    assert_eq!(cfg.toggle_mode, ToggleMode::Binary);
}

#[test]
fn from_json_rejects_empty_toggle_cycle() {
    let err = ThemeConfig::from_json(r#"{ "toggle_cycle": [] }"#).unwrap_err().to_string();
    assert!(err.contains("at least one theme"));
}

#[test]
fn from_json_rejects_empty_default_theme() {
    let err = ThemeConfig::from_json(r#"{ "default_theme": "" }"#).unwrap_err().to_string();
    assert!(err.contains("non-empty"));
}

#[test]
fn from_json_rejects_unknown_fields() {
    let err = ThemeConfig::from_json(r#"{ "storageKey": "x" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn builder_methods_override_fields() {
    let cycle = ToggleCycle::new(vec![Theme::dark(), Theme::light()]).unwrap();
    let cfg = ThemeConfig::default()
        .with_storage_key("k")
        .with_attribute_name("data-scheme")
        .with_default_theme(Theme::dark())
        .with_toggle_cycle(cycle.clone())
        .with_toggle_mode(ToggleMode::Binary);

    assert_eq!(cfg.storage_key, "k");
    assert_eq!(cfg.attribute_name, "data-scheme");
    assert_eq!(cfg.default_theme, "dark");
    assert_eq!(cfg.toggle_cycle, cycle);
    assert_eq!(cfg.toggle_mode, ToggleMode::Binary);
}

#[test]
fn config_round_trips_through_json() {
    let cfg = ThemeConfig::default().with_toggle_mode(ToggleMode::Binary);
    let raw = serde_json::to_string(&cfg).unwrap();
    assert_eq!(ThemeConfig::from_json(&raw).unwrap(), cfg);
}
