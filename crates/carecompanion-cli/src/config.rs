use std::path::{Path, PathBuf};

use carecompanion_core::labels::{Humanized, LabelCatalog, LabelResolver};
use carecompanion_instruments::ScreenerLoader;
use carecompanion_instruments::loader::{BundledScreeners, DirectoryLoader};
use carecompanion_storage::FileRepository;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "CARECOMPANION_CONFIG";

const APP_DIR: &str = "carecompanion";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Where the assessment and screening logs live.
    pub data_dir: PathBuf,
    /// Screener JSON files that take precedence over the bundled set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screeners_dir: Option<PathBuf>,
    /// Flat key → text JSON used to render prompts and option labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels_path: Option<PathBuf>,
    /// Added in v1; older configs get `<data_dir>/exports`.
    pub export_dir: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub created_at: jiff::Timestamp,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CareConfig {
    /// A fresh config rooted at `base`.
    pub fn rooted_at(base: &Path, created_at: jiff::Timestamp) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            data_dir: base.join("data"),
            screeners_dir: None,
            labels_path: None,
            export_dir: base.join("exports"),
            log_level: default_log_level(),
            created_at,
        }
    }

    /// A fresh config under the platform data directory.
    pub fn platform_default() -> eyre::Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
        Ok(Self::rooted_at(&base.join(APP_DIR), jiff::Timestamp::now()))
    }

    pub fn open_repository(&self) -> eyre::Result<FileRepository> {
        FileRepository::open(&self.data_dir).map_err(|e| {
            eyre::eyre!(
                "failed to open data directory {}: {e}",
                self.data_dir.display()
            )
        })
    }

    pub fn screener_loader(&self) -> Box<dyn ScreenerLoader> {
        match &self.screeners_dir {
            Some(dir) => Box::new(DirectoryLoader::new(dir).with_bundled_fallback()),
            None => Box::new(BundledScreeners),
        }
    }

    /// A catalog that fails to load degrades to humanized keys.
    pub fn label_resolver(&self) -> Box<dyn LabelResolver> {
        let Some(path) = &self.labels_path else {
            return Box::new(Humanized);
        };
        match LabelCatalog::from_path(path) {
            Ok(catalog) => {
                tracing::debug!(path = %path.display(), labels = catalog.len(), "label catalog loaded");
                Box::new(catalog)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load label catalog");
                Box::new(Humanized)
            }
        }
    }
}

/// `$CARECOMPANION_CONFIG`, else `<platform config dir>/carecompanion/config.json`.
pub fn config_path() -> eyre::Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join(APP_DIR).join("config.json"))
}

/// Load the config at the default path, or platform defaults if none exists.
pub fn load_config() -> eyre::Result<CareConfig> {
    load_or_default(&config_path()?)
}

pub fn load_or_default(path: &Path) -> eyre::Result<CareConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return CareConfig::platform_default();
    }
    load_config_from(path)
}

pub fn load_config_from(path: &Path) -> eyre::Result<CareConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: CareConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update CareCompanion."
        ));
    }

    // v0 → v1: export_dir became its own setting
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        let data_dir = obj
            .get("data_dir")
            .and_then(|v| v.as_str())
            .map(PathBuf::from)
            .ok_or_else(|| eyre::eyre!("config has no data_dir"))?;
        let export_dir = data_dir.join("exports").to_string_lossy().into_owned();
        obj.entry("export_dir")
            .or_insert(serde_json::Value::String(export_dir));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added export_dir)");
    }

    Ok(json)
}

pub fn save_config_to(config: &CareConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
