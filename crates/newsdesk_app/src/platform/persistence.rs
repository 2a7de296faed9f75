use std::fs;
use std::path::{Path, PathBuf};

use desk_logging::{desk_error, desk_info, desk_warn};
use newsdesk_core::{Preferences, Secret};
use newsdesk_engine::AtomicFileWriter;
use serde::{Deserialize, Serialize};

const PREFERENCES_FILENAME: &str = "preferences.ron";
const DOWNLOAD_DIR_VAR: &str = "NEWSDESK_DOWNLOAD_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct PersistedPreferences {
    last_keywords: Vec<String>,
    last_max_news: u32,
    saved_keywords: Vec<String>,
    api_key: String,
    model: String,
}

impl Default for PersistedPreferences {
    fn default() -> Self {
        Self::from(&Preferences::default())
    }
}

impl From<&Preferences> for PersistedPreferences {
    fn from(preferences: &Preferences) -> Self {
        Self {
            last_keywords: preferences.last_keywords.clone(),
            last_max_news: preferences.last_max_news,
            saved_keywords: preferences.saved_keywords.clone(),
            api_key: preferences.api_key.expose().to_string(),
            model: preferences.model.clone(),
        }
    }
}

impl From<PersistedPreferences> for Preferences {
    fn from(persisted: PersistedPreferences) -> Self {
        Self {
            last_keywords: persisted.last_keywords,
            last_max_news: persisted.last_max_news,
            saved_keywords: persisted.saved_keywords,
            api_key: Secret::new(persisted.api_key),
            model: persisted.model,
        }
    }
}

/// `{config_dir}/newsdesk/preferences.ron`, falling back to the working directory.
pub(crate) fn preferences_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("newsdesk")
        .join(PREFERENCES_FILENAME)
}

/// `NEWSDESK_DOWNLOAD_DIR`, else the platform download folder, else `./downloads`.
pub(crate) fn download_dir() -> PathBuf {
    resolve_download_dir(std::env::var_os(DOWNLOAD_DIR_VAR).map(PathBuf::from), dirs::download_dir())
}

fn resolve_download_dir(override_dir: Option<PathBuf>, platform_dir: Option<PathBuf>) -> PathBuf {
    override_dir
        .filter(|dir| !dir.as_os_str().is_empty())
        .or(platform_dir)
        .unwrap_or_else(|| PathBuf::from("./downloads"))
}

/// Missing or unreadable preferences fall back to defaults.
pub(crate) fn load_preferences(path: &Path) -> Preferences {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Preferences::default();
        }
        Err(err) => {
            desk_warn!("Failed to read preferences from {:?}: {}", path, err);
            return Preferences::default();
        }
    };

    let persisted: PersistedPreferences = match ron::from_str(&content) {
        Ok(persisted) => persisted,
        Err(err) => {
            desk_warn!("Failed to parse preferences from {:?}: {}", path, err);
            return Preferences::default();
        }
    };

    desk_info!("Loaded preferences from {:?}", path);
    persisted.into()
}

pub(crate) fn save_preferences(path: &Path, preferences: &Preferences) {
    let (Some(dir), Some(file_name)) = (path.parent(), path.file_name()) else {
        desk_error!("Preferences path {:?} has no parent directory", path);
        return;
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&PersistedPreferences::from(preferences), pretty)
    {
        Ok(text) => text,
        Err(err) => {
            desk_error!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(dir.to_path_buf());
    if let Err(err) = writer.write(&file_name.to_string_lossy(), content.as_bytes()) {
        desk_error!("Failed to write preferences to {:?}: {}", path, err);
    }
}
