//! Loader for workspace settings with YAML + environment overlays.
//!
//! Settings come from up to three layers, later layers winning: built-in
//! defaults, an optional `cowherd.yaml` file, and `COWHERD_`-prefixed
//! environment variables (nested fields separated by `__`, e.g.
//! `COWHERD_FILTERS__MAX_YEAR=1990`). String values may reference other
//! environment variables as `${VAR}`; expansion is recursive with a depth cap.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Top-level settings for a scrape run.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub site: SiteSettings,
    pub webdriver: WebDriverSettings,
    pub filters: FilterSettings,
    pub output: OutputSettings,
}

/// Where the archive lives and how country browse URLs are built.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Base URL when browsing from inside the subscribing network.
    pub base_url: String,
    /// Base URL routed through the institution's off-campus proxy.
    pub off_campus_url: String,
    /// Path template appended to the base; `{code}` is replaced by the
    /// numeric country code.
    pub country_path: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: "https://heinonline.org/".into(),
            off_campus_url: "https://heinonline-org.ezproxy.lib.university.edu/".into(),
            country_path: "HOL/Index?collection=cow&country={code}".into(),
        }
    }
}

impl SiteSettings {
    /// Browse URL for one country's hierarchy, on the base matching the
    /// operator's network position.
    pub fn country_url(&self, code: u32, off_campus: bool) -> String {
        let base = if off_campus {
            &self.off_campus_url
        } else {
            &self.base_url
        };
        format!(
            "{}{}",
            base,
            self.country_path.replace("{code}", &code.to_string())
        )
    }
}

/// WebDriver endpoint plus the pacing knobs for page walks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WebDriverSettings {
    /// chromedriver endpoint to connect to.
    pub endpoint: String,
    pub headless: bool,
    /// Upper bound on waiting for a page's text element to render.
    pub page_timeout_secs: u64,
    /// Off-campus hierarchy pages sit behind a sign-in redirect; wait this
    /// long for the hierarchy root before giving up.
    pub hierarchy_timeout_secs: u64,
    /// Settle delay bounds between navigations, in milliseconds.
    pub settle_min_ms: u64,
    pub settle_max_ms: u64,
}

impl Default for WebDriverSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9515".into(),
            headless: false,
            page_timeout_secs: 10,
            hierarchy_timeout_secs: 60,
            settle_min_ms: 800,
            settle_max_ms: 1500,
        }
    }
}

/// Which hierarchy titles count as documents worth scraping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub max_year: i32,
    /// When set, keep every dated title instead of keyword-matched ones only.
    pub all_files: bool,
    /// Case-insensitive keywords a title must carry (unless `all_files`).
    pub keywords: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            max_year: 2024,
            all_files: false,
            keywords: vec![
                "constitution".into(),
                "fundamental law".into(),
                "basic law".into(),
                "charter".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct SettingsLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Start with the defaults plus `COWHERD_` env overrides.
    ///
    /// ```
    /// use cowherd_config::SettingsLoader;
    ///
    /// let settings = SettingsLoader::new().load().expect("defaults are valid");
    /// assert_eq!(settings.webdriver.endpoint, "http://localhost:9515");
    /// assert!(!settings.filters.all_files);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()));
        self
    }

    /// Like [`with_file`](Self::with_file) but a missing file is fine, so
    /// headless deployments can rely purely on environment variables.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use cowherd_config::SettingsLoader;
    ///
    /// let settings = SettingsLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// filters:
    ///   max_year: 1990
    ///   all_files: true
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(settings.filters.max_year, 1990);
    /// assert!(settings.filters.all_files);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed settings.
    ///
    /// The loader combines YAML layers with `COWHERD_`-prefixed environment variables
    /// and expands `${VAR}` placeholders before materialising strongly typed structs.
    ///
    /// ```
    /// use cowherd_config::SettingsLoader;
    ///
    /// unsafe { std::env::set_var("ARCHIVE_PROXY", "https://proxy.example.edu"); }
    ///
    /// let settings = SettingsLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// site:
    ///   off_campus_url: "${ARCHIVE_PROXY}/"
    /// "#,
    ///     )
    ///     .load()
    ///     .expect("valid settings");
    ///
    /// assert_eq!(settings.site.off_campus_url, "https://proxy.example.edu/");
    ///
    /// unsafe { std::env::remove_var("ARCHIVE_PROXY"); }
    /// ```
    pub fn load(self) -> Result<Settings, ConfigError> {
        // Env goes in last so it overrides every file layer.
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("COWHERD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        // Recursively expand environment variables
        expand_env_in_value(&mut v);

        // Deserialize into the strongly-typed settings
        let typed: Settings =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}

/// Conventional settings file location: `cowherd.yaml` beside the process,
/// falling back to `~/.config/cowherd/cowherd.yaml`.
pub fn default_settings_path() -> Option<PathBuf> {
    let local = PathBuf::from("cowherd.yaml");
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir().map(|d| d.join("cowherd").join("cowherd.yaml"))
}
