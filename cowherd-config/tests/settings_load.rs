use cowherd_config::SettingsLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_settings_load_from_file() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
site:
  base_url: "https://heinonline.org/"
webdriver:
  headless: true
  page_timeout_secs: 5
filters:
  max_year: 1950
  keywords:
    - constitution
    - charter
output:
  dir: "scraped"
  "#;
    let p = write_yaml(&tmp, "cowherd.yaml", file_yaml);

    let settings = SettingsLoader::new()
        .with_file(p)
        .load()
        .expect("load settings");

    assert!(settings.webdriver.headless);
    assert_eq!(settings.webdriver.page_timeout_secs, 5);
    assert_eq!(settings.filters.max_year, 1950);
    assert_eq!(settings.filters.keywords.len(), 2);
    assert_eq!(settings.output.dir, PathBuf::from("scraped"));
    // Unset sections fall back to defaults.
    assert_eq!(settings.webdriver.endpoint, "http://localhost:9515");
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(
        &tmp,
        "cowherd.yaml",
        r#"
filters:
  max_year: 2000
  all_files: false
"#,
    );

    temp_env::with_vars(
        [
            ("COWHERD_FILTERS__MAX_YEAR", Some("1900")),
            ("COWHERD_FILTERS__ALL_FILES", Some("true")),
        ],
        || {
            let settings = SettingsLoader::new()
                .with_file(&p)
                .load()
                .expect("load settings");
            assert_eq!(settings.filters.max_year, 1900);
            assert!(settings.filters.all_files);
        },
    );
}

#[test]
#[serial]
fn test_optional_file_may_be_missing() {
    let settings = SettingsLoader::new()
        .with_optional_file("does/not/exist/cowherd.yaml")
        .load()
        .expect("missing optional file still loads defaults");
    assert_eq!(settings.filters.max_year, 2024);
}
