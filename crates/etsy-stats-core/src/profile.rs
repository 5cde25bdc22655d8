use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_chrome_profile() -> String {
    "Default".to_string()
}

/// Per-user settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Shop name, used for spreadsheet tab names.
    pub shop: String,
    /// Chrome profile directory name inside the user-data root.
    #[serde(default = "default_chrome_profile")]
    pub chrome_profile: String,
}

impl UserProfile {
    #[must_use]
    pub fn new(shop: impl Into<String>) -> Self {
        Self {
            shop: shop.into(),
            chrome_profile: default_chrome_profile(),
        }
    }
}

/// Load and validate the user profile from a YAML file.
///
/// Returns `Ok(None)` when the file does not exist yet.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profile(path: &Path) -> Result<Option<UserProfile>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::ProfileFileIo {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    let profile: UserProfile = serde_yaml::from_str(&content)?;
    validate_profile(&profile)?;

    Ok(Some(profile))
}

/// Validate and write the user profile, creating parent directories as needed.
///
/// # Errors
///
/// Returns `ConfigError` if validation fails or the file cannot be written.
pub fn save_profile(path: &Path, profile: &UserProfile) -> Result<(), ConfigError> {
    validate_profile(profile)?;

    let io_err = |source: std::io::Error| ConfigError::ProfileFileIo {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let yaml = serde_yaml::to_string(profile)?;
    std::fs::write(path, yaml).map_err(io_err)
}

fn validate_profile(profile: &UserProfile) -> Result<(), ConfigError> {
    if profile.shop.trim().is_empty() {
        return Err(ConfigError::Validation(
            "profile shop name must be non-empty".to_string(),
        ));
    }
    if profile.chrome_profile.trim().is_empty() {
        return Err(ConfigError::Validation(
            "profile chrome_profile must be non-empty".to_string(),
        ));
    }
    Ok(())
}
