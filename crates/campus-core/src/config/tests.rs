use super::*;

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.api.base_url, "http://localhost:8000");
    assert_eq!(cfg.api.timeout_secs, 10);
    assert_eq!(cfg.api.locale_transport, LocaleTransportKind::Header);
    assert!(cfg.api.dedupe_inflight);
    assert_eq!(cfg.locale.default, Locale::Ru);
    assert_eq!(cfg.locale.preference_key, "i18nextLng");
    assert_eq!(cfg.store.db_path, "~/.campus/data/campus.db");
}

#[test]
fn test_empty_toml_uses_defaults() {
    let cfg = parse("").unwrap();
    assert_eq!(cfg.campus.log_level, "info");
    assert_eq!(cfg.api.query_param, "lang");
}

#[test]
fn test_partial_sections() {
    let cfg = parse(
        r#"
        [api]
        base_url = "https://api.salymbekov.kg"
        locale_transport = "query"

        [locale]
        default = "ky"
    "#,
    )
    .unwrap();
    assert_eq!(cfg.api.base_url, "https://api.salymbekov.kg");
    assert_eq!(cfg.api.locale_transport, LocaleTransportKind::Query);
    assert_eq!(cfg.api.timeout_secs, 10);
    assert_eq!(cfg.locale.default, Locale::Kg);
    assert!(validate(&cfg).is_ok());
}

#[test]
fn test_unknown_locale_rejected() {
    let err = parse("[locale]\ndefault = \"de\"").unwrap_err();
    assert!(matches!(err, CampusError::Config(_)));
}

#[test]
fn test_env_override() {
    let cfg = apply_env(Config::default(), Some("https://staging.example ".into()));
    assert_eq!(cfg.api.base_url, "https://staging.example");

    let cfg = apply_env(Config::default(), Some("   ".into()));
    assert_eq!(cfg.api.base_url, "http://localhost:8000");
}

#[test]
fn test_validate_rejects_bad_values() {
    let mut cfg = Config::default();
    cfg.api.base_url = "not a url".into();
    assert!(validate(&cfg).is_err());

    let mut cfg = Config::default();
    cfg.api.timeout_secs = 0;
    assert!(validate(&cfg).is_err());

    let mut cfg = Config::default();
    cfg.api.locale_transport = LocaleTransportKind::Query;
    cfg.api.query_param = String::new();
    assert!(validate(&cfg).is_err());
}

#[test]
fn test_load_missing_file_gives_defaults() {
    let cfg = load("/nonexistent/__campus_test__/config.toml").unwrap();
    assert_eq!(cfg.api.timeout_secs, 10);
}

#[test]
fn test_load_from_file() {
    let tmp = std::env::temp_dir().join("__campus_test_config__.toml");
    std::fs::write(&tmp, "[api]\ntimeout_secs = 3\n").unwrap();
    let cfg = load(tmp.to_str().unwrap()).unwrap();
    assert_eq!(cfg.api.timeout_secs, 3);
    let _ = std::fs::remove_file(&tmp);
}

#[test]
fn test_shellexpand() {
    assert_eq!(shellexpand("/abs/path"), "/abs/path");
    if let Some(home) = std::env::var_os("HOME") {
        assert_eq!(
            shellexpand("~/x.db"),
            format!("{}/x.db", home.to_string_lossy())
        );
    }
}
