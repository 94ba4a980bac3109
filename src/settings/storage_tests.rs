use super::*;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> SettingsStore {
    SettingsStore::new(dir.path().join("nested").join(SETTINGS_FILE))
}

#[test]
fn test_load_creates_defaults_on_first_run() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    assert!(!store.path().exists());

    let settings = store.load().unwrap();

    assert_eq!(settings, Settings::default());
    assert!(store.path().exists());
}

#[test]
fn test_save_then_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let settings = Settings {
        api_key: "sk-abc".to_string(),
        custom_prompt: "Mention free shipping".to_string(),
        context_messages: 12,
        ..Settings::default()
    };

    store.save(&settings).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded.api_key, "sk-abc");
    assert_eq!(loaded.custom_prompt, "Mention free shipping");
    assert_eq!(loaded.context_messages, 12);
}

#[test]
fn test_save_rejects_invalid_settings() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let settings = Settings {
        max_tokens: 5,
        ..Settings::default()
    };

    let err = store.save(&settings).unwrap_err();

    assert!(matches!(err, SettingsError::Invalid(_)));
    assert!(!store.path().exists());
}

#[test]
fn test_load_reports_parse_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    fs::write(&path, "max_tokens = \"many\"").unwrap();
    let mut store = SettingsStore::new(path);

    let err = store.load().unwrap_err();

    assert!(matches!(err, SettingsError::Parse { .. }));
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store
        .save(&Settings {
            api_key: "sk-abc".to_string(),
            ..Settings::default()
        })
        .unwrap();

    let settings = store.reset().unwrap();

    assert_eq!(settings, Settings::default());
    assert_eq!(store.load().unwrap(), Settings::default());
}

#[test]
fn test_reload_if_changed_is_quiet_without_edits() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.load().unwrap();

    assert!(store.reload_if_changed().unwrap().is_none());
}

#[test]
fn test_reload_if_changed_sees_external_edit() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.load().unwrap();

    // Another process rewrites the file; forget our timestamp so the
    // comparison does not depend on filesystem mtime resolution.
    fs::write(store.path(), "enabled = false\n").unwrap();
    store.last_modified = None;

    let reloaded = store.reload_if_changed().unwrap();

    assert_eq!(reloaded.map(|s| s.enabled), Some(false));
}

#[test]
fn test_reload_if_changed_missing_file() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    assert!(store.reload_if_changed().unwrap().is_none());
}

#[test]
fn test_parse_settings_toml_reports_path() {
    let err = parse_settings_toml(Path::new("/tmp/x.toml"), "enabled = 3").unwrap_err();
    assert!(err.to_string().contains("/tmp/x.toml"));
}

#[test]
fn test_reload_reports_broken_file_once() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.load().unwrap();

    fs::write(store.path(), "enabled = \"maybe\"\n").unwrap();
    store.last_modified = None;

    assert!(store.reload_if_changed().is_err());
    // Same file contents, same mtime: nothing new to report
    assert!(store.reload_if_changed().unwrap().is_none());
}

#[test]
fn test_reload_rejects_out_of_range_edit_once() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.load().unwrap();

    fs::write(store.path(), "timeout_secs = 0\ncontext_messages = 0\n").unwrap();
    store.last_modified = None;

    let err = store.reload_if_changed().unwrap_err();
    assert!(matches!(err, SettingsError::Invalid(_)));
    assert!(store.reload_if_changed().unwrap().is_none());
}

#[test]
fn test_load_checked_rejects_what_load_accepts() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.load().unwrap();
    fs::write(store.path(), "temperature = 9.0\n").unwrap();

    assert_eq!(store.load().unwrap().temperature, 9.0);
    assert!(store.load_checked().is_err());
}
